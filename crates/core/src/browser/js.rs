//! In-page scripts evaluated over CDP.

/// Expression that clicks the first visible element whose trimmed text
/// contains `text` (case-insensitive) and reports whether one was found.
///
/// Among nested matches the innermost one wins, so a `<button>` is clicked
/// rather than the `<body>` that also contains the text.
pub(crate) fn click_visible_text_expr(text: &str) -> String {
    // serde_json renders a double-quoted JS string literal with all
    // metacharacters escaped.
    let needle = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(() => {{
  const needle = {needle}.trim().toLowerCase();
  if (!needle || !document.body) return false;
  const matches = [];
  for (const el of document.body.querySelectorAll('*')) {{
    if (!(el instanceof HTMLElement)) continue;
    if (el.getClientRects().length === 0) continue;
    const text = (el.innerText || '').trim().toLowerCase();
    if (text.includes(needle)) matches.push(el);
  }}
  const target = matches.find((el) => !matches.some((other) => other !== el && el.contains(other)));
  if (!target) return false;
  target.click();
  return true;
}})()"#
    )
}
