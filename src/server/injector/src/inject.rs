/* src/server/injector/src/inject.rs */

/// Insert a module-script reference for `entry` immediately before the first
/// `</body>`. Content before the tag and after it is left byte-for-byte
/// intact. Content without a closing body tag gets the script appended.
pub fn inject_entry(raw: &str, entry: &str) -> String {
  let tag = format!(r#"<script type="module" src="{entry}"></script>"#);
  match raw.find("</body>") {
    Some(pos) => {
      let mut out = String::with_capacity(raw.len() + tag.len());
      out.push_str(&raw[..pos]);
      out.push_str(&tag);
      out.push_str(&raw[pos..]);
      out
    }
    None => format!("{raw}{tag}"),
  }
}
