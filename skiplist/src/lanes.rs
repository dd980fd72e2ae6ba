use std::fmt;

use crate::skiplist::Nodes;

/// Printable picture of a `SkipList`, one line per level with the highest level first.
///
/// Every value gets a column, in ascending order.  On levels the value's node does not reach, the
/// column is filled with dashes instead:
///
/// ```text
/// L2: - - 5 --
/// L1: - 3 5 --
/// L0: 1 3 5 10
/// ```
pub struct Lanes<'a, T> {
    height: usize,
    nodes: Nodes<'a, T>,
}

impl<'a, T> Lanes<'a, T> {
    pub(crate) fn new(height: usize, nodes: Nodes<'a, T>) -> Self {
        Lanes { height, nodes }
    }
}

impl<'a, T> fmt::Display for Lanes<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let columns: Vec<(String, usize)> = self
            .nodes
            .clone()
            .map(|node| (node.to_string(), node.levels()))
            .collect();
        let label = self.height.saturating_sub(1).to_string().len();

        let mut lvl = self.height;
        while lvl > 0 {
            lvl -= 1;
            write!(f, "L{:<width$}:", lvl, width = label)?;
            for &(ref value, levels) in &columns {
                if levels > lvl {
                    write!(f, " {}", value)?;
                } else {
                    write!(f, " {}", "-".repeat(value.chars().count()))?;
                }
            }
            if lvl > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<'a, T> fmt::Debug for Lanes<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
