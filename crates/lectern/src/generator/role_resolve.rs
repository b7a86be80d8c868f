/*!
Functional role resolution.

Toolkits report literal roles; presentation depends on what the node is
doing. The first matching rule wins:

1. math sub-kind from the `tag` attribute, inside math
2. digital-publishing landmark or section from `xml-roles`
3. a link that cannot be followed is an anchor
4. block quote, comment and description-list constructs
5. an article inside a feed
6. a `region` landmark only counts when named
7. a document holding nothing but an image is an image
*/

use crate::a11y::{Role, State};
use crate::provider::{Accessible, NodeExt};

const DPUB_LANDMARKS: &[&str] = &[
  "doc-acknowledgments",
  "doc-afterword",
  "doc-appendix",
  "doc-bibliography",
  "doc-chapter",
  "doc-conclusion",
  "doc-credits",
  "doc-endnotes",
  "doc-epilogue",
  "doc-errata",
  "doc-foreword",
  "doc-glossary",
  "doc-index",
  "doc-introduction",
  "doc-pagelist",
  "doc-part",
  "doc-preface",
  "doc-prologue",
  "doc-toc",
];

/// The role `node` should be presented as.
pub fn functional_role<N: Accessible>(node: &N) -> Role {
  let role = node.role_or_unknown();
  let attributes = node.attributes_or_empty();
  let tag = attributes
    .get("tag")
    .map(|t| t.to_ascii_lowercase())
    .unwrap_or_default();
  let xml_roles: Vec<&str> = attributes
    .get("xml-roles")
    .map(|r| r.split_whitespace().collect())
    .unwrap_or_default();

  if let Some(math) = math_role(node, role, &tag) {
    return math;
  }
  if let Some(dpub) = dpub_role(&xml_roles) {
    return dpub;
  }
  if role == Role::Link && is_anchor(node, &xml_roles) {
    return Role::Anchor;
  }
  if let Some(construct) = construct_role(&tag, &xml_roles) {
    return construct;
  }
  if role == Role::Article
    && node
      .parent_or_none()
      .is_some_and(|p| p.role_or_unknown() == Role::Feed)
  {
    return Role::FeedArticle;
  }
  if role == Role::Landmark && xml_roles.contains(&"region") {
    return if node.name_or_empty().trim().is_empty() {
      Role::Landmark
    } else {
      Role::RegionLandmark
    };
  }
  if matches!(role, Role::Document | Role::DocumentWeb) {
    if let [only] = node.children_or_empty().as_slice() {
      if only.role_or_unknown() == Role::Image {
        return Role::Image;
      }
    }
  }
  role
}

fn math_role<N: Accessible>(node: &N, role: Role, tag: &str) -> Option<Role> {
  let kind = match tag {
    "mfrac" => Role::MathFraction,
    "msqrt" | "mroot" => Role::MathRoot,
    "msub" => Role::MathSubscript,
    "msup" | "msubsup" => Role::MathSuperscript,
    "munder" | "mover" | "munderover" => Role::MathUnderOver,
    "mmultiscripts" => Role::MathMultiscript,
    "menclose" => Role::MathEnclosed,
    "mfenced" => Role::MathFenced,
    "mtable" => Role::MathTable,
    "mtr" | "mlabeledtr" => Role::MathRow,
    "mtd" => Role::MathCell,
    _ => return None,
  };
  let in_math =
    role == Role::Math || node.find_ancestor(|a| a.role_or_unknown() == Role::Math).is_some();
  in_math.then_some(kind)
}

fn dpub_role(xml_roles: &[&str]) -> Option<Role> {
  let dpub = xml_roles.iter().find(|r| r.starts_with("doc-"))?;
  Some(if DPUB_LANDMARKS.contains(dpub) {
    Role::DpubLandmark
  } else {
    Role::DpubSection
  })
}

fn is_anchor<N: Accessible>(node: &N, xml_roles: &[&str]) -> bool {
  xml_roles.is_empty() && !node.has_state(State::Focusable) && !node.has_action("jump")
}

fn construct_role(tag: &str, xml_roles: &[&str]) -> Option<Role> {
  let has = |name: &str| xml_roles.contains(&name);
  if tag == "blockquote" || has("blockquote") {
    Some(Role::BlockQuote)
  } else if has("comment") {
    Some(Role::Comment)
  } else if tag == "dl" {
    Some(Role::DescriptionList)
  } else if tag == "dt" || has("term") {
    Some(Role::DescriptionTerm)
  } else if tag == "dd" || has("definition") {
    Some(Role::DescriptionValue)
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::MockTree;

  #[test]
  fn literal_role_by_default() {
    let tree = MockTree::new();
    let button = tree.node(Role::PushButton, "OK");
    assert_eq!(functional_role(&button), Role::PushButton);
  }

  #[test]
  fn math_constructs_need_math_context() {
    let tree = MockTree::new();
    let math = tree.node(Role::Math, "");
    let frac = tree.node(Role::Section, "");
    frac.set_attribute("tag", "mfrac");
    math.append(&frac);
    assert_eq!(functional_role(&frac), Role::MathFraction);

    let stray = tree.node(Role::Section, "");
    stray.set_attribute("tag", "mfrac");
    assert_eq!(functional_role(&stray), Role::Section);
  }

  #[test]
  fn math_root_tag_on_math_node() {
    let tree = MockTree::new();
    let math = tree.node(Role::Math, "");
    math.set_attribute("tag", "MSQRT");
    assert_eq!(functional_role(&math), Role::MathRoot);
  }

  #[test]
  fn dpub_landmark_vs_section() {
    let tree = MockTree::new();
    let toc = tree.node(Role::Landmark, "Contents");
    toc.set_attribute("xml-roles", "doc-toc");
    assert_eq!(functional_role(&toc), Role::DpubLandmark);

    let abstract_ = tree.node(Role::Section, "");
    abstract_.set_attribute("xml-roles", "doc-abstract");
    assert_eq!(functional_role(&abstract_), Role::DpubSection);
  }

  #[test]
  fn unfollowable_link_is_anchor() {
    let tree = MockTree::new();
    let anchor = tree.node(Role::Link, "top");
    assert_eq!(functional_role(&anchor), Role::Anchor);

    let focusable = tree.node(Role::Link, "Home");
    focusable.add_state(State::Focusable);
    assert_eq!(functional_role(&focusable), Role::Link);

    let jumpable = tree.node(Role::Link, "Home");
    jumpable.add_action("Jump");
    assert_eq!(functional_role(&jumpable), Role::Link);

    let with_roles = tree.node(Role::Link, "Home");
    with_roles.set_attribute("xml-roles", "link");
    assert_eq!(functional_role(&with_roles), Role::Link);
  }

  #[test]
  fn constructs_from_markup() {
    let tree = MockTree::new();
    let quote = tree.node(Role::Section, "");
    quote.set_attribute("tag", "blockquote");
    assert_eq!(functional_role(&quote), Role::BlockQuote);

    let comment = tree.node(Role::Section, "");
    comment.set_attribute("xml-roles", "comment");
    assert_eq!(functional_role(&comment), Role::Comment);

    let dl = tree.node(Role::List, "");
    dl.set_attribute("tag", "dl");
    assert_eq!(functional_role(&dl), Role::DescriptionList);

    let dd = tree.node(Role::Section, "");
    dd.set_attribute("tag", "dd");
    assert_eq!(functional_role(&dd), Role::DescriptionValue);
  }

  #[test]
  fn feed_article() {
    let tree = MockTree::new();
    let feed = tree.node(Role::Feed, "News");
    let article = tree.node(Role::Article, "Story");
    feed.append(&article);
    assert_eq!(functional_role(&article), Role::FeedArticle);

    let loose = tree.node(Role::Article, "Story");
    assert_eq!(functional_role(&loose), Role::Article);
  }

  #[test]
  fn region_only_when_named() {
    let tree = MockTree::new();
    let named = tree.node(Role::Landmark, "Filters");
    named.set_attribute("xml-roles", "region");
    assert_eq!(functional_role(&named), Role::RegionLandmark);

    let nameless = tree.node(Role::Landmark, "");
    nameless.set_attribute("xml-roles", "region");
    assert_eq!(functional_role(&nameless), Role::Landmark);
  }

  #[test]
  fn image_document() {
    let tree = MockTree::new();
    let doc = tree.node(Role::DocumentWeb, "photo.png");
    doc.append(&tree.node(Role::Image, "photo"));
    assert_eq!(functional_role(&doc), Role::Image);

    doc.append(&tree.node(Role::Paragraph, ""));
    assert_eq!(functional_role(&doc), Role::DocumentWeb);
  }

  #[test]
  fn math_wins_over_dpub() {
    let tree = MockTree::new();
    let math = tree.node(Role::Math, "");
    math.set_attribute("tag", "mtable");
    math.set_attribute("xml-roles", "doc-example");
    assert_eq!(functional_role(&math), Role::MathTable);
  }
}
