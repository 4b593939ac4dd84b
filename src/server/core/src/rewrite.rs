/* src/server/core/src/rewrite.rs */

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};

/// Context handed to a function-valued rewrite target.
pub struct RewriteCtx<'h> {
  /// Decoded request path the rule matched against.
  pub path: &'h str,
  pub captures: &'h Captures<'h>,
}

pub type RewriteFn = Arc<dyn Fn(&RewriteCtx<'_>) -> String + Send + Sync>;

/// Target of a rewrite rule: either a literal template with `$1` / `${name}`
/// capture substitution, or a function of the matched path and captures.
#[derive(Clone)]
pub enum RewriteTarget {
  Template(String),
  Func(RewriteFn),
}

/// A custom (pattern -> target) rewrite rule. Rules are evaluated in
/// declaration order and always take priority over virtual-page fallback
/// routing.
#[derive(Clone)]
pub struct RewriteRule {
  pub from: Regex,
  pub to: RewriteTarget,
}

impl RewriteRule {
  pub fn new(from: Regex, to: impl Into<String>) -> Self {
    Self { from, to: RewriteTarget::Template(to.into()) }
  }

  pub fn with_fn(from: Regex, to: RewriteFn) -> Self {
    Self { from, to: RewriteTarget::Func(to) }
  }
}

impl fmt::Debug for RewriteRule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let to = match self.to {
      RewriteTarget::Template(ref t) => t.as_str(),
      RewriteTarget::Func(_) => "<fn>",
    };
    f.debug_struct("RewriteRule").field("from", &self.from.as_str()).field("to", &to).finish()
  }
}

/// Result of a successful rewrite-rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteHit {
  pub target: String,
  pub rule_index: usize,
}

/// Evaluate rules strictly in order against the percent-decoded pathname and
/// return the first hit. Single pass: targets are never re-checked against
/// the rule list, so rewrite loops cannot form. Total over its inputs; "no
/// match" is `None`, never an error.
pub fn match_rewrites(pathname: &str, rules: &[RewriteRule]) -> Option<RewriteHit> {
  let decoded =
    percent_decode_str(pathname).decode_utf8().map_or_else(|_| pathname.to_string(), Cow::into_owned);
  for (rule_index, rule) in rules.iter().enumerate() {
    if let Some(captures) = rule.from.captures(&decoded) {
      let target = match rule.to {
        RewriteTarget::Template(ref template) => {
          let mut out = String::new();
          captures.expand(template, &mut out);
          out
        }
        RewriteTarget::Func(ref func) => func(&RewriteCtx { path: &decoded, captures: &captures }),
      };
      return Some(RewriteHit { target, rule_index });
    }
  }
  None
}

#[cfg(test)]
mod tests {
  use super::*;

  fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
  }

  #[test]
  fn first_matching_rule_wins() {
    let rules = vec![
      RewriteRule::new(re("^/user/"), "/user.html"),
      RewriteRule::new(re("^/user/admin$"), "/admin.html"),
    ];
    let hit = match_rewrites("/user/admin", &rules).unwrap();
    assert_eq!(hit.target, "/user.html");
    assert_eq!(hit.rule_index, 0);
  }

  #[test]
  fn numbered_capture_substitution() {
    let rules = vec![RewriteRule::new(re("^/old/([^/]+)$"), "/pages/$1.html")];
    let hit = match_rewrites("/old/team", &rules).unwrap();
    assert_eq!(hit.target, "/pages/team.html");
  }

  #[test]
  fn named_capture_substitution() {
    let rules = vec![RewriteRule::new(re("^/(?P<section>[a-z]+)/index$"), "/${section}.html")];
    let hit = match_rewrites("/docs/index", &rules).unwrap();
    assert_eq!(hit.target, "/docs.html");
  }

  #[test]
  fn function_target_sees_path_and_captures() {
    let rules = vec![RewriteRule::with_fn(
      re("^/go/(\\w+)$"),
      Arc::new(|ctx: &RewriteCtx<'_>| {
        assert!(ctx.path.starts_with("/go/"));
        format!("/{}.html", &ctx.captures[1])
      }),
    )];
    let hit = match_rewrites("/go/pricing", &rules).unwrap();
    assert_eq!(hit.target, "/pricing.html");
  }

  #[test]
  fn no_match_across_all_rules_is_none() {
    let rules = vec![RewriteRule::new(re("^/a$"), "/a.html")];
    assert_eq!(match_rewrites("/b", &rules), None);
    assert_eq!(match_rewrites("/a", &[]), None);
  }

  #[test]
  fn matches_against_decoded_path() {
    let rules = vec![RewriteRule::new(re("^/café$"), "/cafe.html")];
    let hit = match_rewrites("/caf%C3%A9", &rules).unwrap();
    assert_eq!(hit.target, "/cafe.html");
  }
}
