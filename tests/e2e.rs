//! End-to-end tests for wxrto.
//!
//! Each test writes a small WXR export into a temporary directory, runs the
//! full batch, and inspects the generated site.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wxrto::{
    convert_file, convert_sync, ConversionConfig, InputSource, JobError, JobOutcome, SkipReason,
    WxrError,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0"
	xmlns:excerpt="http://wordpress.org/export/1.2/excerpt/"
	xmlns:content="http://purl.org/rss/1.0/modules/content/"
	xmlns:wfw="http://wellformedweb.org/CommentAPI/"
	xmlns:dc="http://purl.org/dc/elements/1.1/"
	xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
	<title>Example</title>
	<link>https://example.com</link>
	<wp:wxr_version>1.2</wp:wxr_version>
	<wp:author><wp:author_id>1</wp:author_id><wp:author_login><![CDATA[admin]]></wp:author_login></wp:author>
"#;

const FOOTER: &str = "</channel>\n</rss>\n";

fn wxr_item(
    title: &str,
    body: &str,
    date: &str,
    slug: &str,
    status: &str,
    post_type: &str,
) -> String {
    format!(
        r#"	<item>
		<title><![CDATA[{title}]]></title>
		<link>https://example.com/{slug}/</link>
		<dc:creator><![CDATA[admin]]></dc:creator>
		<content:encoded><![CDATA[{body}]]></content:encoded>
		<excerpt:encoded><![CDATA[]]></excerpt:encoded>
		<wp:post_id>1</wp:post_id>
		<wp:post_date><![CDATA[{date}]]></wp:post_date>
		<wp:post_name><![CDATA[{slug}]]></wp:post_name>
		<wp:status><![CDATA[{status}]]></wp:status>
		<wp:post_type><![CDATA[{post_type}]]></wp:post_type>
		<wp:postmeta>
			<wp:meta_key><![CDATA[_edit_last]]></wp:meta_key>
			<wp:meta_value><![CDATA[1]]></wp:meta_value>
		</wp:postmeta>
	</item>
"#
    )
}

/// Route job logs to the test harness; `RUST_LOG=wxrto=debug` to see them.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn write_export(dir: &Path, items: &[String]) -> PathBuf {
    let path = dir.join("export.xml");
    let mut xml = String::from(HEADER);
    for item in items {
        xml.push_str(item);
    }
    xml.push_str(FOOTER);
    std::fs::write(&path, xml).expect("write export");
    path
}

fn config_for(out: &Path, concurrency: usize) -> ConversionConfig {
    ConversionConfig::builder()
        .output_dir(out)
        .concurrency(concurrency)
        .generator_name("hugo")
        .build()
        .expect("valid config")
}

const GUTENBERG_POST: &str = r#"<!-- wp:heading -->
<h2>Getting started</h2>
<!-- /wp:heading -->

<!-- wp:paragraph -->
<p>Read <a href="https://example.com/docs">the docs</a> or <em>don't</em>.</p>
<!-- /wp:paragraph -->

<!-- wp:list {"ordered":true} -->
<ol><li>Install</li><li>Configure</li><li>Run</li></ol>
<!-- /wp:list -->

<!-- wp:code -->
<pre class="wp-block-code"><code>cargo run -- --help</code></pre>
<!-- /wp:code -->

<!-- wp:image -->
<figure class="wp-block-image"><img src="https://example.com/wp-content/uploads/shot.png" alt="Screenshot"/></figure>
<!-- /wp:image -->"#;

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn converts_posts_and_pages() {
    init_logging();
    let tmp = TempDir::new().unwrap();
    let export = write_export(
        tmp.path(),
        &[
            wxr_item(
                "Getting Started",
                GUTENBERG_POST,
                "2021-08-07 07:56:40",
                "getting-started",
                "publish",
                "post",
            ),
            wxr_item(
                "About",
                "<p>Hello <strong>world</strong></p>",
                "2020-11-29 16:29:33",
                "about",
                "draft",
                "page",
            ),
        ],
    );
    let out = tmp.path().join("site");

    let report = convert_file(&export, &config_for(&out, 4)).await.unwrap();
    assert_eq!(report.stats.total, 2);
    assert_eq!(report.stats.written, 2);

    let post =
        std::fs::read_to_string(out.join("content/posts/2021-08-07-getting-started.md")).unwrap();
    assert!(post.starts_with(
        "---\ntitle: \"Getting Started\"\ndate: 2021-08-07 07:56:40\ndraft: false\n---\n\n"
    ));
    assert!(post.contains("## Getting started"), "{post}");
    assert!(post.contains("Read [the docs](https://example.com/docs) or *don't*."));
    assert!(post.contains("1. Install\n2. Configure\n3. Run"));
    assert!(post.contains("```\ncargo run -- --help\n```"));
    assert!(post.contains("![Screenshot](https://example.com/wp-content/uploads/shot.png)"));
    assert!(!post.contains("wp:paragraph"), "comments must not leak: {post}");

    let page = std::fs::read_to_string(out.join("content/about.md")).unwrap();
    assert!(page.contains("draft: true"));
    assert!(page.ends_with("Hello **world**"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn skips_and_failures_do_not_stop_the_batch() {
    init_logging();
    let tmp = TempDir::new().unwrap();
    let export = write_export(
        tmp.path(),
        &[
            wxr_item(
                "Main Menu",
                "",
                "2021-01-01 00:00:00",
                "main-menu",
                "publish",
                "nav_menu_item",
            ),
            wxr_item("Deleted", "<p>x</p>", "2021-01-01 00:00:00", "deleted", "trash", "post"),
            wxr_item("No Date", "<p>x</p>", "0000-00-00 00:00:00", "no-date", "draft", "post"),
            wxr_item("Kept", "<p>kept</p>", "2021-01-01 00:00:00", "kept", "publish", "post"),
        ],
    );
    let out = tmp.path().join("site");

    let report = convert_file(&export, &config_for(&out, 2)).await.unwrap();
    assert_eq!(report.stats.written, 1);
    assert_eq!(report.stats.skipped, 2);
    assert_eq!(report.stats.failed, 1);

    assert!(matches!(
        report.outcomes[0],
        JobOutcome::Skipped { reason: SkipReason::NotPostOrPage, .. }
    ));
    assert!(matches!(
        report.outcomes[1],
        JobOutcome::Skipped { reason: SkipReason::Trashed, .. }
    ));
    assert!(matches!(
        report.outcomes[2],
        JobOutcome::Failed { error: JobError::InvalidDate { .. }, .. }
    ));
    assert!(out.join("content/posts/2021-01-01-kept.md").exists());
    assert!(!out.join("content/posts/2021-01-01-deleted.md").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_items_with_small_gate() {
    init_logging();
    let tmp = TempDir::new().unwrap();
    let items: Vec<String> = (0..40)
        .map(|i| {
            wxr_item(
                &format!("Post {i}"),
                &format!("<h3>Number {i}</h3><ul><li>a</li><li>b</li></ul>"),
                "2022-03-04 05:06:07",
                &format!("post-{i}"),
                "publish",
                "post",
            )
        })
        .collect();
    let export = write_export(tmp.path(), &items);
    let out = tmp.path().join("site");

    let report = convert_file(&export, &config_for(&out, 3)).await.unwrap();
    assert_eq!(report.stats.written, 40);

    let posts = std::fs::read_dir(out.join("content/posts")).unwrap().count();
    assert_eq!(posts, 40, "no stray temp files, one file per post");

    let one = std::fs::read_to_string(out.join("content/posts/2022-03-04-post-17.md")).unwrap();
    assert!(one.ends_with("### Number 17* a\n* b"), "{one}");
}

#[tokio::test]
async fn rerun_overwrites_outputs() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("site");
    let first = write_export(
        tmp.path(),
        &[wxr_item("Page", "<p>one</p>", "2021-01-01 00:00:00", "page", "publish", "page")],
    );
    convert_file(&first, &config_for(&out, 1)).await.unwrap();

    let second = write_export(
        tmp.path(),
        &[wxr_item("Page", "<p>two</p>", "2021-01-01 00:00:00", "page", "publish", "page")],
    );
    convert_file(&second, &config_for(&out, 1)).await.unwrap();

    let text = std::fs::read_to_string(out.join("content/page.md")).unwrap();
    assert!(text.ends_with("two"));
}

#[tokio::test]
async fn not_an_export_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("feed.xml");
    std::fs::write(&path, "<feed><entry/></feed>").unwrap();

    let err = convert_file(&path, &config_for(&tmp.path().join("site"), 1))
        .await
        .unwrap_err();
    assert!(matches!(err, WxrError::MalformedExport { .. }), "{err}");
}

#[test]
fn unknown_generator_is_fatal_before_conversion() {
    let err = ConversionConfig::builder()
        .generator_name("jekyll")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("not installed"));
}

#[test]
fn sync_wrapper_runs_a_batch() {
    let tmp = TempDir::new().unwrap();
    let export = write_export(
        tmp.path(),
        &[wxr_item("Hi", "<h1>Hi</h1>", "2021-05-06 07:08:09", "hi", "publish", "post")],
    );
    let out = tmp.path().join("site");

    let report = convert_sync(&InputSource::File(export), &config_for(&out, 2)).unwrap();
    assert_eq!(report.stats.written, 1);
    let text = std::fs::read_to_string(out.join("content/posts/2021-05-06-hi.md")).unwrap();
    assert!(text.ends_with("# Hi"));
}
