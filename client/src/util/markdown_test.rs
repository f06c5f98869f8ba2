use super::*;

#[test]
fn renders_lists_and_code() {
    let html = render_html("1. Unplug\n2. Wait\n\n```\nreset --all\n```");
    assert!(html.contains("<ol>"));
    assert!(html.contains("<li>Unplug</li>"));
    assert!(html.contains("<pre><code>reset --all"));
}

#[test]
fn drops_raw_html() {
    let html = render_html("hello <script>alert(1)</script>\n\n<div onclick=\"x\">block</div>");
    assert!(!html.contains("<script>"));
    assert!(!html.contains("onclick"));
    assert!(html.contains("hello"));
}

#[test]
fn renders_tables() {
    let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |");
    assert!(html.contains("<table>"));
}
