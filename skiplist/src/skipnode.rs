use std::fmt;

// /////////////////////////////////////////////////////////////////////////////////////////////////
// SkipNode
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// SkipNodes make up the SkipList.  They live in the list's arena and refer to each other by arena
/// index.  The list itself plays the role of the head node through its vector of lane heads.
///
/// `links[i]` is the next node on level `i`, or `None` at the tail of that level.  The number of
/// links is the node's level count, which is fixed when the node is created.
#[derive(Clone, Debug)]
pub struct SkipNode<V> {
    pub value: V,
    pub links: Vec<Option<usize>>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<V> SkipNode<V> {
    /// Create a new SkipNode reaching `levels` levels.  All its links are `None` and have to be
    /// adjusted.
    pub fn new(value: V, levels: usize) -> Self {
        SkipNode {
            value,
            links: vec![None; levels],
        }
    }

    /// How many levels the node reaches.
    #[inline]
    pub fn levels(&self) -> usize {
        self.links.len()
    }

    /// Consumes the node returning the value it contains.
    pub fn into_inner(self) -> V {
        self.value
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<V> fmt::Display for SkipNode<V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
