use crate::tokenizer::{GedLine, Tokenizer};
use crate::types::GedError;

/// A GED structure with its nested substructures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedNode {
    pub tag: String,
    pub xref: Option<String>,
    /// Value with `CONC`/`CONT` continuations folded in.
    pub value: String,
    pub line: usize,
    pub children: Vec<GedNode>,
}

impl GedNode {
    fn from_line(line: GedLine) -> Self {
        Self {
            tag: line.tag,
            xref: line.xref,
            value: line.value,
            line: line.line,
            children: Vec::new(),
        }
    }

    /// First direct child with `tag`.
    pub fn child(&self, tag: &str) -> Option<&GedNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with `tag`, in source order.
    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a GedNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Trimmed value of the first `tag` child, if non-empty.
    pub fn child_value(&self, tag: &str) -> Option<&str> {
        self.child(tag)
            .map(|c| c.value.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Parse decoded GED text into its level-0 records.
pub fn parse(source: &str) -> Result<Vec<GedNode>, GedError> {
    let tokenizer = Tokenizer::new(source)?;
    build_records(tokenizer.items)
}

pub(crate) fn build_records(lines: Vec<GedLine>) -> Result<Vec<GedNode>, GedError> {
    let mut records: Vec<GedNode> = Vec::new();
    // Open nodes from the current record down to the deepest one.
    let mut stack: Vec<(u16, GedNode)> = Vec::new();

    for line in lines {
        if line.level == 0 {
            close_to(&mut stack, 0, &mut records);
            stack.push((0, GedNode::from_line(line)));
            continue;
        }

        let Some(&(parent_level, _)) = stack.last() else {
            return Err(GedError::line(
                line.line,
                format!("level {} structure outside of any record", line.level),
            ));
        };

        if matches!(line.tag.as_str(), "CONC" | "CONT") && line.level == parent_level + 1 {
            if let Some((_, parent)) = stack.last_mut() {
                if line.tag == "CONT" {
                    parent.value.push('\n');
                }
                parent.value.push_str(&line.value);
            }
            continue;
        }

        if line.level > parent_level + 1 {
            tracing::debug!(line = line.line, "level jump, attaching to deepest open structure");
        }
        let level = line.level.min(parent_level + 1);
        close_to(&mut stack, level, &mut records);
        stack.push((level, GedNode::from_line(line)));
    }

    close_to(&mut stack, 0, &mut records);
    Ok(records)
}

/// Pop every open node at `level` or deeper, attaching each to its parent.
fn close_to(stack: &mut Vec<(u16, GedNode)>, level: u16, records: &mut Vec<GedNode>) {
    while let Some(&(top_level, _)) = stack.last() {
        if top_level < level {
            break;
        }
        let Some((_, node)) = stack.pop() else { break };
        match stack.last_mut() {
            Some((_, parent)) => parent.children.push(node),
            None => records.push(node),
        }
    }
}
