use std::collections::VecDeque;
use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::Write;

use super::RedBlackTree;
use super::ordering::KeyedRecord;

/// Writes `tree` as a graphviz description, one filled circle per node
/// in its red or black color.
///
/// Nodes are declared under sequential ids and labelled with the record
/// text, so duplicate records under a Fifo/Lifo key render as distinct
/// nodes.
pub fn convert_to_graphviz<R>(tree: &RedBlackTree<R>, filename: &str) -> io::Result<()>
where
    R: KeyedRecord + Display,
{
    let mut file = File::create(filename)?;

    writeln!(&mut file, "digraph RBT {{")?;
    writeln!(
        &mut file,
        "    node [shape=circle, style=filled, fontcolor=white];"
    )?;

    let mut queue = VecDeque::new();
    let mut next_id = 1usize;

    if let Some(root) = &tree.root {
        queue.push_back((root, 0usize));
    }

    while let Some((node, id)) = queue.pop_front() {
        let fill = if node.is_red() { "red" } else { "black" };
        writeln!(
            &mut file,
            "    n{id} [label=\"{}\", fillcolor={fill}];",
            node.record
        )?;

        for child in [&node.left, &node.right].into_iter().flatten() {
            writeln!(&mut file, "    n{id} -> n{next_id};")?;
            queue.push_back((child, next_id));
            next_id += 1;
        }
    }

    writeln!(&mut file, "}}")?;

    Ok(())
}
