//! Box-drawn rendering of the tree shape, for debugging.
//!
//! The tree is drawn sideways: right subtrees above their parent, left
//! subtrees below, one node per line with a spacer line between nodes. Each
//! node prints as `[key: value] (balance)`.
//!
//! ```text
//!    +--[6: 60] (0)
//!    |
//! +--[5: 50] (-1)
//! |
//! [4: 40] (0)
//! |
//! +--[2: 20] (1)
//!    |
//!    +--[1: 10] (0)
//! ```

use crate::types::{ArenaTreeMap, NodeId, NULL_NODE};
use std::fmt;

impl<B> ArenaTreeMap<B> {
    /// Render the tree as text. Returns an empty string for an empty tree.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        // lines[0] is unused so that line numbers match the layout math
        let num_lines = self.len() * 2 - 1;
        let mut lines = vec![String::new(); num_lines + 1];

        let root_line = 1 + self.spacing(self.arena[self.root].right);
        self.write_subtree(self.root, &mut lines, root_line, 1, num_lines + 1);

        let mut out = String::new();
        for line in &lines[1..] {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    /// Lines taken by a subtree plus the spacer that follows it.
    fn spacing(&self, id: NodeId) -> usize {
        2 * self.arena.weight(id)
    }

    /// Draw `id` at `root_line`, with its subtrees confined to
    /// `lower..upper` (upper exclusive).
    fn write_subtree(
        &self,
        id: NodeId,
        lines: &mut [String],
        root_line: usize,
        lower: usize,
        upper: usize,
    ) {
        let node = &self.arena[id];
        lines[root_line].push_str(&format!(
            "[{}: {}] ({})",
            node.key,
            node.value,
            self.arena.balance_factor(id)
        ));

        if node.right != NULL_NODE {
            let dashes = 1 + self.spacing(self.arena[node.right].left);
            let child_line = root_line - dashes - 1;
            for line in &mut lines[child_line + 1..root_line] {
                line.push_str("|  ");
            }
            lines[child_line].push_str("+--");
            for line in &mut lines[lower..child_line] {
                line.push_str("   ");
            }
            self.write_subtree(node.right, lines, child_line, lower, root_line);
        }

        if node.left != NULL_NODE {
            let dashes = 1 + self.spacing(self.arena[node.left].right);
            let child_line = root_line + dashes + 1;
            for line in &mut lines[root_line + 1..child_line] {
                line.push_str("|  ");
            }
            lines[child_line].push_str("+--");
            for line in &mut lines[child_line + 1..upper] {
                line.push_str("   ");
            }
            self.write_subtree(node.left, lines, child_line, root_line + 1, upper);
        }
    }
}

impl<B> fmt::Display for ArenaTreeMap<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use crate::types::AvlTreeMap;

    #[test]
    fn test_render_empty() {
        let tree = AvlTreeMap::new(1).unwrap();
        assert_eq!(tree.render(), "");
    }

    #[test]
    fn test_render_three_nodes() {
        let tree = AvlTreeMap::bulk_build(&[(1, 10), (2, 20), (3, 30)]).unwrap();
        let expected = "\
+--[3: 30] (0)
|
[2: 20] (0)
|
+--[1: 10] (0)
";
        assert_eq!(tree.render(), expected);
        assert_eq!(tree.to_string(), expected);
    }

    #[test]
    fn test_render_uneven_tree() {
        let mut tree = AvlTreeMap::new(8).unwrap();
        for k in [4, 2, 5, 1, 6] {
            tree.insert(k, k * 10).unwrap();
        }
        let expected = "   +--[6: 60] (0)
   |
+--[5: 50] (-1)
|
[4: 40] (0)
|
+--[2: 20] (1)
   |
   +--[1: 10] (0)
";
        assert_eq!(tree.render(), expected);
    }

    #[test]
    fn test_render_has_one_line_per_node_and_spacer() {
        let pairs: Vec<(u64, u64)> = (0..20).map(|k| (k, k)).collect();
        let tree = AvlTreeMap::bulk_build(&pairs).unwrap();
        let rendered = tree.render();
        assert_eq!(rendered.lines().count(), 39);
        assert_eq!(rendered.lines().filter(|l| l.contains('[')).count(), 20);
    }
}
