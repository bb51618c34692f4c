//! Simple selector matching
//!
//! Supports the subset used for listener delegation: a tag name, `#id`,
//! `.class`, `*`, and compounds of those (`button.primary`,
//! `input#name.wide`). No combinators, no attribute selectors.

use crate::node::NodeRef;

#[derive(Debug, PartialEq)]
enum Segment {
    Tag(String),
    Id(String),
    Class(String),
}

fn parse(selector: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = selector.trim();
    while !rest.is_empty() {
        let (kind, body) = match rest.as_bytes()[0] {
            b'.' => ('.', &rest[1..]),
            b'#' => ('#', &rest[1..]),
            _ => (' ', rest),
        };
        let end = body
            .find(|c| c == '.' || c == '#')
            .unwrap_or(body.len());
        let (name, remainder) = body.split_at(end);
        match kind {
            '.' => segments.push(Segment::Class(name.to_string())),
            '#' => segments.push(Segment::Id(name.to_string())),
            _ => segments.push(Segment::Tag(name.to_string())),
        }
        rest = remainder;
    }
    segments
}

/// Match a node against a simple selector. Text nodes never match.
pub fn matches(node: &NodeRef, selector: &str) -> bool {
    let Some(tag) = node.tag() else {
        return false;
    };
    let segments = parse(selector);
    if segments.is_empty() {
        return false;
    }
    segments.iter().all(|segment| match segment {
        Segment::Tag(name) => name == "*" || *name == tag,
        Segment::Id(id) => node.attribute("id").as_deref() == Some(id.as_str()),
        Segment::Class(class) => node
            .attribute("class")
            .map(|value| value.split_whitespace().any(|c| c == class))
            .unwrap_or(false),
    })
}
