/* src/server/injector/src/render.rs */

use std::borrow::Cow;

use serde_json::{Map, Value};
use tera::{Context, Tera};

use crate::inject::inject_entry;

/// Variable pass over raw template content. The scope is `env` overlaid with
/// `data`; page data wins on key collision.
///
/// Unchanged output comes back as `Cow::Borrowed` of the input, so callers
/// with source-map-sensitive pipelines can tell "nothing happened" apart
/// from "rendered to equal content" and skip reprocessing.
pub fn render_vars<'a>(
  raw: &'a str,
  env: &Map<String, Value>,
  data: &Map<String, Value>,
) -> Result<Cow<'a, str>, tera::Error> {
  let mut scope = Context::new();
  for (key, value) in env {
    scope.insert(key, value);
  }
  for (key, value) in data {
    scope.insert(key, value);
  }
  let out = Tera::one_off(raw, &scope, false)?;
  if out == raw { Ok(Cow::Borrowed(raw)) } else { Ok(Cow::Owned(out)) }
}

/// Full template pass: entry injection when an entry is set, followed by
/// variable substitution. No entry means no injection; the raw content goes
/// straight into the variable pass.
pub fn render_template<'a>(
  raw: &'a str,
  entry: Option<&str>,
  env: &Map<String, Value>,
  data: &Map<String, Value>,
) -> Result<Cow<'a, str>, tera::Error> {
  match entry {
    None => render_vars(raw, env, data),
    Some(entry) => {
      let injected = inject_entry(raw, entry);
      let rendered = render_vars(&injected, env, data)?;
      Ok(Cow::Owned(rendered.into_owned()))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn map(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string()))).collect()
  }

  #[test]
  fn unchanged_content_is_borrowed_identity() {
    let raw = "<html><body><p>static</p></body></html>";
    let out = render_vars(raw, &Map::new(), &Map::new()).unwrap();
    match out {
      Cow::Borrowed(s) => assert!(std::ptr::eq(s.as_ptr(), raw.as_ptr())),
      Cow::Owned(_) => panic!("unchanged content must not be copied"),
    }
  }

  #[test]
  fn page_data_wins_over_env() {
    let env = map(&[("title", "Env"), ("mode", "development")]);
    let data = map(&[("title", "Page")]);
    let out = render_vars("{{ title }}/{{ mode }}", &env, &data).unwrap();
    assert_eq!(out, "Page/development");
  }

  #[test]
  fn render_is_idempotent_across_calls() {
    let data = map(&[("title", "Home")]);
    let first = render_vars("<h1>{{ title }}</h1>", &Map::new(), &data).unwrap().into_owned();
    let second = render_vars("<h1>{{ title }}</h1>", &Map::new(), &data).unwrap().into_owned();
    assert_eq!(first, second);
    assert_eq!(first, "<h1>Home</h1>");
  }

  #[test]
  fn syntax_error_surfaces() {
    assert!(render_vars("{% if %}", &Map::new(), &Map::new()).is_err());
  }

  #[test]
  fn entry_injection_combines_with_vars() {
    let raw = "<body><h1>{{ title }}</h1></body>";
    let data = map(&[("title", "Docs")]);
    let out = render_template(raw, Some("/src/docs/main.ts"), &Map::new(), &data).unwrap();
    assert_eq!(
      out,
      concat!(
        "<body><h1>Docs</h1>",
        r#"<script type="module" src="/src/docs/main.ts"></script>"#,
        "</body>",
      ),
    );
    assert!(matches!(out, Cow::Owned(_)));
  }

  #[test]
  fn no_entry_no_placeholders_returns_input() {
    let raw = "<body>plain</body>";
    let out = render_template(raw, None, &Map::new(), &Map::new()).unwrap();
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(out, raw);
  }
}
