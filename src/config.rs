//! Configuration types for a WXR-to-Markdown batch.
//!
//! All batch behaviour is controlled through [`ConversionConfig`], built via
//! its [`ConversionConfigBuilder`]. Nothing is read from process-wide state,
//! so two batches with different output roots or generators can run in the
//! same process.

use crate::error::WxrError;
use crate::frontmatter::Generator;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for a batch conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use wxrto::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .output_dir("site")
///     .concurrency(4)
///     .generator_name("hugo")
///     .build()
///     .unwrap();
/// assert_eq!(config.concurrency, 4);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Root of the generated site. Default: `output`.
    ///
    /// Posts go to `<output_dir>/content/posts`, pages to
    /// `<output_dir>/content`.
    pub output_dir: PathBuf,

    /// Maximum number of documents converted at once. Default: 8.
    ///
    /// Each job is short and mostly file I/O; the limit exists to bound open
    /// file handles and memory on exports with thousands of posts.
    pub concurrency: usize,

    /// Front-matter flavour. Default: [`Generator::Hugo`].
    pub generator: Generator,

    /// Optional callback for real-time progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            concurrency: 8,
            generator: Generator::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("output_dir", &self.output_dir)
            .field("concurrency", &self.concurrency)
            .field("generator", &self.generator)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
            generator_name: None,
        }
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.output_dir)
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
    generator_name: Option<String>,
}

impl ConversionConfigBuilder {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn generator(mut self, generator: Generator) -> Self {
        self.config.generator = generator;
        self.generator_name = None;
        self
    }

    /// Select the generator by name; resolved (and rejected if unknown) in
    /// [`build`](Self::build).
    pub fn generator_name(mut self, name: impl Into<String>) -> Self {
        self.generator_name = Some(name.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(mut self) -> Result<ConversionConfig, WxrError> {
        if let Some(name) = self.generator_name.take() {
            self.config.generator = name.parse()?;
        }
        if self.config.output_dir.as_os_str().is_empty() {
            return Err(WxrError::InvalidConfig(
                "Output directory must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Directory conventions of the generated site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// `<root>/content`; pages are written here directly.
    pub fn content_dir(&self) -> PathBuf {
        self.root.join("content")
    }

    /// `<root>/content/posts`.
    pub fn posts_dir(&self) -> PathBuf {
        self.content_dir().join("posts")
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.content_dir()
    }
}
