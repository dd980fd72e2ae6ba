use std::cmp::{self, Ordering};
use std::fmt;
use std::vec;

use config::{Config, MaxLevel};
use logger::{log, Level, Logger};

use crate::error::SkipListError;
use crate::lanes::Lanes;
use crate::level_generator::{tree_levels, GeometricalLevelGenerator, LevelGenerator};
use crate::skipnode::SkipNode;

// /////////////////////////////////////////////////////////////////////////////////////////////////
// SkipList
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// SkipList stores a set of unique values, always sorted, and provides efficient ways to search,
/// insert and remove them.
///
/// Nodes live in an arena owned by the list and link to each other by index.  The list keeps one
/// lane head per level; the number of lane heads (the height) always equals the level count of the
/// tallest node, so lanes left empty by a removal are dropped straight away.
///
/// New nodes get their level count from a `LevelGenerator`, bounded by the list's `MaxLevel`
/// policy evaluated on the number of elements *before* the insertion, and by the current height
/// plus one.
pub struct SkipList<T, G = GeometricalLevelGenerator> {
    // Storage, in insertion order; vacant slots are recorded in `free`.
    nodes: Vec<Option<SkipNode<T>>>,
    free: Vec<usize>,
    // `heads[lvl]` is the first node on level `lvl`.
    heads: Vec<Option<usize>>,
    len: usize,
    max_level: MaxLevel,
    level_generator: G,
    logger: Logger,
}

fn compare<T: PartialOrd>(a: &T, b: &T) -> Result<Ordering, SkipListError> {
    a.partial_cmp(b).ok_or(SkipListError::Incomparable)
}

/// Values which are not even equal to themselves (`NaN`) can never be placed.
fn ensure_ordered<T: PartialOrd>(value: &T) -> Result<(), SkipListError> {
    match value.partial_cmp(value) {
        Some(Ordering::Equal) => Ok(()),
        _ => Err(SkipListError::Incomparable),
    }
}

fn sort_checked<T: PartialOrd>(values: &mut [T]) -> Result<(), SkipListError> {
    let mut incomparable = false;
    values.sort_by(|a, b| match a.partial_cmp(b) {
        Some(ordering) => ordering,
        None => {
            incomparable = true;
            Ordering::Equal
        }
    });
    if incomparable {
        Err(SkipListError::Incomparable)
    } else {
        Ok(())
    }
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipList<T>
where
    T: PartialOrd,
{
    /// Create a new skiplist with the default logarithmic level ceiling, `p = 1/2`, an
    /// OS-seeded level generator and warnings logged to standard error.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::SkipList;
    ///
    /// let mut skiplist: SkipList<i64> = SkipList::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        SkipList::from_parts(
            MaxLevel::Logarithmic,
            GeometricalLevelGenerator::default(),
            Logger::new_err(Level::Warning),
        )
    }

    /// Create a new skiplist from `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use config::{Config, MaxLevel};
    /// use skiplist::SkipList;
    ///
    /// let config = Config { max_level: MaxLevel::Fixed(3), ..Config::mock(42) };
    /// let skiplist: SkipList<i64> = SkipList::with_config(&config).unwrap();
    /// assert!(skiplist.is_empty());
    /// ```
    pub fn with_config(config: &Config) -> Result<Self, SkipListError> {
        let lg = GeometricalLevelGenerator::from_config(config)?;
        SkipList::with_generator(config, lg)
    }
}

impl<T, G> SkipList<T, G>
where
    T: PartialOrd,
    G: LevelGenerator,
{
    /// Create a new skiplist from `config`, drawing levels from `level_generator` instead of the
    /// geometric generator described by `config`.
    pub fn with_generator(config: &Config, level_generator: G) -> Result<Self, SkipListError> {
        config.validate()?;
        Ok(SkipList::from_parts(
            config.max_level.clone(),
            level_generator,
            config.logger()?,
        ))
    }
}

impl<T, G> SkipList<T, G> {
    fn from_parts(max_level: MaxLevel, level_generator: G, logger: Logger) -> Self {
        SkipList {
            nodes: Vec::new(),
            free: Vec::new(),
            heads: Vec::new(),
            len: 0,
            max_level,
            level_generator,
            logger,
        }
    }

    /// Replaces the logger, e.g. to capture structural events while debugging.
    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = logger;
    }

    /// Returns the number of elements in the skiplist.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.bulk_load(0..10, false).unwrap();
    /// assert_eq!(skiplist.len(), 10);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Same as `len`.
    #[inline]
    pub fn count(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skiplist contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of populated levels, which is the level count of the tallest node.
    #[inline]
    pub fn height(&self) -> usize {
        self.heads.len()
    }

    /// Clears the skiplist, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.bulk_load(0..10, true).unwrap();
    /// skiplist.clear();
    /// assert!(skiplist.is_empty());
    /// assert_eq!(skiplist.height(), 0);
    /// ```
    pub fn clear(&mut self) {
        let len = self.len;
        self.nodes.clear();
        self.free.clear();
        self.heads.clear();
        self.len = 0;
        log!(self.logger, Verbose, "cleared {} values", len);
    }

    /// Provides a reference to the smallest element, or `None` if the skiplist is empty.
    pub fn first(&self) -> Option<&T> {
        self.successor(None).map(|idx| &self.node(idx).value)
    }

    /// Provides a reference to the largest element, or `None` if the skiplist is empty.
    pub fn last(&self) -> Option<&T> {
        let mut node = None;
        let mut lvl = self.heads.len();
        while lvl > 0 {
            lvl -= 1;
            while let Some(next) = self.next(node, lvl) {
                node = Some(next);
            }
        }
        node.map(|idx| &self.node(idx).value)
    }

    /// Creates an iterator over the values of the skiplist, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.bulk_load(vec![3, 1, 2], false).unwrap();
    /// assert_eq!(skiplist.iter().cloned().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        self.lane(0)
    }

    /// Creates an iterator over the values present on level `lvl`, in ascending order.  Levels at
    /// or above the height are empty.
    pub fn lane(&self, lvl: usize) -> Iter<'_, T> {
        Iter {
            inner: Nodes {
                nodes: &self.nodes,
                cursor: self.heads.get(lvl).copied().flatten(),
                lvl,
            },
        }
    }

    /// A printable view of every lane, highest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.bulk_load(vec![1, 2, 3], true).unwrap();
    /// assert_eq!(skiplist.lanes().to_string(), "L1: - 2 -\nL0: 1 2 3");
    /// ```
    pub fn lanes(&self) -> Lanes<'_, T> {
        Lanes::new(self.heads.len(), self.nodes())
    }

    pub(crate) fn nodes(&self) -> Nodes<'_, T> {
        Nodes {
            nodes: &self.nodes,
            cursor: self.heads.first().copied().flatten(),
            lvl: 0,
        }
    }

    #[inline]
    fn node(&self, idx: usize) -> &SkipNode<T> {
        match self.nodes[idx] {
            Some(ref node) => node,
            None => panic!("Encountered a vacant node."),
        }
    }

    #[inline]
    fn node_mut(&mut self, idx: usize) -> &mut SkipNode<T> {
        match self.nodes[idx] {
            Some(ref mut node) => node,
            None => panic!("Encountered a vacant node."),
        }
    }

    /// The node after `node` on level `lvl`, where `None` stands for the head of the list.
    #[inline]
    fn next(&self, node: Option<usize>, lvl: usize) -> Option<usize> {
        match node {
            Some(idx) => self.node(idx).links[lvl],
            None => self.heads[lvl],
        }
    }

    #[inline]
    fn set_next(&mut self, node: Option<usize>, lvl: usize, next: Option<usize>) {
        match node {
            Some(idx) => self.node_mut(idx).links[lvl] = next,
            None => self.heads[lvl] = next,
        }
    }

    /// The node after `node` on level 0, also for an empty list.
    #[inline]
    fn successor(&self, node: Option<usize>) -> Option<usize> {
        match node {
            Some(idx) => self.node(idx).links[0],
            None => self.heads.first().copied().flatten(),
        }
    }

    fn allocate(&mut self, node: SkipNode<T>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) -> SkipNode<T> {
        match self.nodes[idx].take() {
            Some(node) => {
                self.free.push(idx);
                node
            }
            None => panic!("Released a vacant node."),
        }
    }

    /// Unlinks `target` from every level it is on.  `prev` must hold its predecessor on each of
    /// those levels.
    fn unlink(&mut self, target: usize, prev: &[Option<usize>]) -> T {
        let node = self.release(target);
        // Before:    [prev] --> [target] --> [1]
        // After:     [prev] ---------------> [1]
        for (lvl, &next) in node.links.iter().enumerate() {
            self.set_next(prev[lvl], lvl, next);
        }
        let height = self.heads.len();
        while let Some(&None) = self.heads.last() {
            self.heads.pop();
        }
        self.len -= 1;
        if self.len == 0 {
            self.nodes.clear();
            self.free.clear();
        }
        log!(
            self.logger,
            Debug,
            "unlinked node {} from {} levels, height {} -> {}, len {}",
            target,
            node.levels(),
            height,
            self.heads.len(),
            self.len
        );
        node.into_inner()
    }

    /// Links a new node reaching `levels` levels right after the nodes in `prev`.  Lanes above the
    /// current height are created as needed, starting at the new node.
    fn link(&mut self, value: T, levels: usize, mut prev: Vec<Option<usize>>) -> usize {
        let height = self.heads.len();
        if levels > height {
            self.heads.resize(levels, None);
        }
        if levels > prev.len() {
            prev.resize(levels, None);
        }
        let idx = self.allocate(SkipNode::new(value, levels));
        // Before:    [prev] ------------> [1]
        // After:     [prev] --> [new] --> [1]
        for (lvl, &before) in prev.iter().enumerate().take(levels) {
            let after = self.next(before, lvl);
            self.node_mut(idx).links[lvl] = after;
            self.set_next(before, lvl, Some(idx));
        }
        self.len += 1;
        log!(
            self.logger,
            Debug,
            "linked node {} on {} levels, height {} -> {}, len {}",
            idx,
            levels,
            height,
            self.heads.len(),
            self.len
        );
        idx
    }
}

impl<T, G> SkipList<T, G>
where
    T: PartialOrd,
{
    /// Walks down from the highest lane towards `value`, calling `visit` with the last node
    /// strictly less than `value` on each level before dropping to the next one.  Returns that
    /// node for level 0, or `None` if `value` belongs at the front.
    fn descend<F>(&self, value: &T, mut visit: F) -> Result<Option<usize>, SkipListError>
    where
        F: FnMut(usize, Option<usize>),
    {
        let mut node = None;

        // Start at the top (least-populated) level and work our way down.
        let mut lvl = self.heads.len();
        while lvl > 0 {
            lvl -= 1;

            while let Some(next) = self.next(node, lvl) {
                if compare(&self.node(next).value, value)? == Ordering::Less {
                    node = Some(next);
                } else {
                    break;
                }
            }
            visit(lvl, node);
        }
        Ok(node)
    }

    /// The splice points for `value`: entry `lvl` is the last node on level `lvl` which is less
    /// than `value`, or `None` when that is the head of the list.  Entry 0 is the immediate
    /// predecessor.
    fn find_predecessors(&self, value: &T) -> Result<Vec<Option<usize>>, SkipListError> {
        let mut prev = vec![None; self.heads.len()];
        self.descend(value, |lvl, node| prev[lvl] = node)?;
        Ok(prev)
    }

    fn find_node(&self, value: &T) -> Result<Option<usize>, SkipListError> {
        let prev = self.descend(value, |_, _| ())?;
        match self.successor(prev) {
            Some(next) if compare(&self.node(next).value, value)? == Ordering::Equal => Ok(Some(next)),
            _ => Ok(None),
        }
    }

    /// Returns true if the value is contained in the skiplist.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.bulk_load(0..10, false).unwrap();
    /// assert!(skiplist.contains(&4));
    /// assert!(!skiplist.contains(&15));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        matches!(self.find_node(value), Ok(Some(_)))
    }

    /// Same as `contains`.
    #[inline]
    pub fn present(&self, value: &T) -> bool {
        self.contains(value)
    }

    /// Provides a reference to the stored value equal to `value`.
    pub fn find(&self, value: &T) -> Option<&T> {
        match self.find_node(value) {
            Ok(Some(idx)) => Some(&self.node(idx).value),
            _ => None,
        }
    }

    /// How many levels the node holding `value` reaches.
    pub fn level_of(&self, value: &T) -> Option<usize> {
        match self.find_node(value) {
            Ok(Some(idx)) => Some(self.node(idx).levels()),
            _ => None,
        }
    }

    /// Fails unless every value can be ordered, is absent from the list and appears once.
    fn check_new_values(&self, values: &[T]) -> Result<(), SkipListError> {
        let mut sorted: Vec<&T> = Vec::with_capacity(values.len());
        for value in values {
            ensure_ordered(value)?;
            if self.find_node(value)?.is_some() {
                return Err(SkipListError::DuplicateValue);
            }
            sorted.push(value);
        }
        sort_checked(&mut sorted)?;
        for pair in sorted.windows(2) {
            if compare(pair[0], pair[1])? != Ordering::Less {
                return Err(SkipListError::DuplicateValue);
            }
        }
        Ok(())
    }
}

impl<T, G> SkipList<T, G>
where
    T: PartialOrd,
    G: LevelGenerator,
{
    fn ceiling(&self, count: usize) -> Result<usize, SkipListError> {
        match self.max_level.ceiling(count) {
            Ok(ceiling) => Ok(ceiling),
            Err(e) => {
                log!(self.logger, Warning, "rejected level ceiling: {}", e);
                Err(e.into())
            }
        }
    }

    /// Level count for a node inserted while the list holds `count` elements on `height` levels.
    fn draw_level(&mut self, count: usize, height: usize) -> Result<usize, SkipListError> {
        let ceiling = self.ceiling(count)?;
        let limit = cmp::min(ceiling, height + 1);
        let levels = self.level_generator.random(limit);
        if levels == 0 || levels > limit {
            log!(
                self.logger,
                Warning,
                "level generator returned {} outside [1, {}]",
                levels,
                limit
            );
            return Err(SkipListError::InvalidConfiguration(format!(
                "level generator returned {} outside [1, {}]",
                levels, limit
            )));
        }
        Ok(levels)
    }

    /// Level counts for `n` values inserted one after the other, drawn before any of them is
    /// linked.
    fn draw_levels(&mut self, n: usize) -> Result<Vec<usize>, SkipListError> {
        let mut height = self.heads.len();
        let mut levels = Vec::with_capacity(n);
        for count in self.len..self.len + n {
            let level = self.draw_level(count, height)?;
            height = cmp::max(height, level);
            levels.push(level);
        }
        Ok(levels)
    }

    /// Insert the element into the skiplist.
    ///
    /// Fails with `DuplicateValue` if an equal value is already present, and with `Incomparable`
    /// if the value cannot be ordered.  The list is left untouched on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{SkipList, SkipListError};
    ///
    /// let mut skiplist = SkipList::new();
    ///
    /// skiplist.insert(0).unwrap();
    /// skiplist.insert(5).unwrap();
    /// assert_eq!(skiplist.insert(5), Err(SkipListError::DuplicateValue));
    /// assert_eq!(skiplist.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) -> Result<(), SkipListError> {
        ensure_ordered(&value)?;
        let prev = self.find_predecessors(&value)?;
        if let Some(next) = self.successor(prev.first().copied().flatten()) {
            if compare(&self.node(next).value, &value)? == Ordering::Equal {
                return Err(SkipListError::DuplicateValue);
            }
        }
        let levels = self.draw_level(self.len, self.heads.len())?;
        self.link(value, levels, prev);
        Ok(())
    }

    /// Removes and returns the element equal to `value`, failing with `ValueNotFound` if there is
    /// none.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{SkipList, SkipListError};
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.bulk_load(0..10, false).unwrap();
    /// assert_eq!(skiplist.delete(&4), Ok(4));
    /// assert_eq!(skiplist.delete(&4), Err(SkipListError::ValueNotFound));
    /// ```
    pub fn delete(&mut self, value: &T) -> Result<T, SkipListError> {
        ensure_ordered(value)?;
        let prev = self.find_predecessors(value)?;
        let target = match self.successor(prev.first().copied().flatten()) {
            Some(next) if compare(&self.node(next).value, value)? == Ordering::Equal => next,
            _ => return Err(SkipListError::ValueNotFound),
        };
        Ok(self.unlink(target, &prev))
    }

    /// Replaces `old` with `new`, returning the removed value.  The new value gets a freshly drawn
    /// level count.
    ///
    /// Fails with `ValueNotFound` if `old` is absent and `DuplicateValue` if `new` is already
    /// present (and not equal to `old`); the list is unchanged in both cases.
    pub fn replace(&mut self, old: &T, new: T) -> Result<T, SkipListError> {
        ensure_ordered(&new)?;
        let prev_old = self.find_predecessors(old)?;
        let target = match self.successor(prev_old.first().copied().flatten()) {
            Some(next) if compare(&self.node(next).value, old)? == Ordering::Equal => next,
            _ => return Err(SkipListError::ValueNotFound),
        };
        let mut prev_new = self.find_predecessors(&new)?;
        if let Some(next) = self.successor(prev_new.first().copied().flatten()) {
            if next != target && compare(&self.node(next).value, &new)? == Ordering::Equal {
                return Err(SkipListError::DuplicateValue);
            }
        }
        let levels = self.draw_level(self.len, self.heads.len())?;

        // Once `old` is gone, its predecessors take its place as splice points.
        for (lvl, slot) in prev_new.iter_mut().enumerate() {
            if *slot == Some(target) {
                *slot = prev_old[lvl];
            }
        }
        let removed = self.unlink(target, &prev_old);
        let levels = cmp::min(levels, self.heads.len() + 1);
        self.link(new, levels, prev_new);
        Ok(removed)
    }

    /// Inserts every value of `values`.
    ///
    /// With `tree_like` unset, each value gets a random level count exactly as `insert` would give
    /// it.  With `tree_like` set, the values are sorted and get the level counts of a balanced
    /// binary search tree (see `tree_levels`), the median reaching one level above the ceiling
    /// computed for `values.len()` elements.  A tree-like load can therefore reach one level above
    /// a `Fixed` ceiling, and a single value loaded this way gets two levels.  The balanced shape is
    /// only guaranteed when loading into an empty list.
    ///
    /// Nothing is inserted if any value is already present, appears twice, or cannot be ordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.bulk_load(vec![7, 1, 5, 3, 9, 2, 8], true).unwrap();
    /// assert_eq!(skiplist.iter().cloned().collect::<Vec<_>>(), vec![1, 2, 3, 5, 7, 8, 9]);
    /// assert_eq!(skiplist.height(), 3);
    /// ```
    pub fn bulk_load<I>(&mut self, values: I, tree_like: bool) -> Result<(), SkipListError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut values: Vec<T> = values.into_iter().collect();
        if values.is_empty() {
            return Ok(());
        }
        self.check_new_values(&values)?;
        let levels = if tree_like {
            sort_checked(&mut values)?;
            tree_levels(values.len(), self.ceiling(values.len())?)
        } else {
            self.draw_levels(values.len())?
        };

        let height = self.heads.len();
        let loaded = values.len();
        for (value, levels) in values.into_iter().zip(levels) {
            let prev = self.find_predecessors(&value)?;
            self.link(value, levels, prev);
        }
        log!(
            self.logger,
            Verbose,
            "loaded {} values ({}), height {} -> {}, len {}",
            loaded,
            if tree_like { "tree-like" } else { "random" },
            height,
            self.heads.len(),
            self.len
        );
        Ok(())
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for SkipList<T>
where
    T: PartialOrd,
{
    fn default() -> SkipList<T> {
        SkipList::new()
    }
}

/// Copies the whole structure: the clone has the same values, and every node keeps its level
/// count and its neighbours on every level.  No node is shared with the original.
///
/// The clone writes to the same `Logger`, so changing its log level affects both lists.
impl<T, G> Clone for SkipList<T, G>
where
    T: Clone,
    G: Clone,
{
    fn clone(&self) -> Self {
        // First pass: one new node per node, in level-0 order, linked on level 0 only.
        let mut nodes: Vec<Option<SkipNode<T>>> = Vec::with_capacity(self.len);
        for node in self.nodes() {
            let idx = nodes.len();
            if let Some(Some(last)) = nodes.last_mut() {
                last.links[0] = Some(idx);
            }
            nodes.push(Some(SkipNode::new(node.value.clone(), node.levels())));
        }

        // Second pass: walk the new level-0 chain, appending each node to every lane it reaches.
        let mut heads: Vec<Option<usize>> = Vec::new();
        let mut last_seen: Vec<usize> = Vec::new();
        let mut cursor = if nodes.is_empty() { None } else { Some(0) };
        while let Some(idx) = cursor {
            let (levels, next) = match nodes[idx] {
                Some(ref node) => (node.levels(), node.links[0]),
                None => panic!("Encountered a vacant node."),
            };
            for lvl in 0..levels {
                if lvl == heads.len() {
                    heads.push(Some(idx));
                    last_seen.push(idx);
                } else {
                    if let Some(ref mut tracker) = nodes[last_seen[lvl]] {
                        tracker.links[lvl] = Some(idx);
                    }
                    last_seen[lvl] = idx;
                }
            }
            cursor = next;
        }

        log!(
            self.logger,
            Verbose,
            "cloned {} values on {} levels",
            self.len,
            heads.len()
        );
        SkipList {
            nodes,
            free: Vec::new(),
            heads,
            len: self.len,
            max_level: self.max_level.clone(),
            level_generator: self.level_generator.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<A, B, G, H> PartialEq<SkipList<B, H>> for SkipList<A, G>
where
    A: PartialEq<B>,
{
    #[inline]
    fn eq(&self, other: &SkipList<B, H>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, G> fmt::Debug for SkipList<T, G>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;

        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", entry)?;
        }
        write!(f, "]")
    }
}

impl<T, G> fmt::Display for SkipList<T, G>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;

        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", entry)?;
        }
        write!(f, "]")
    }
}

impl<T, G> IntoIterator for SkipList<T, G> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(mut self) -> vec::IntoIter<T> {
        let mut values = Vec::with_capacity(self.len);
        let mut cursor = self.successor(None);
        while let Some(idx) = cursor {
            let node = self.release(idx);
            cursor = node.links[0];
            values.push(node.into_inner());
        }
        values.into_iter()
    }
}

impl<'a, T, G> IntoIterator for &'a SkipList<T, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ///////////////////////////////////////////////
// Extra structs
// ///////////////////////////////////////////////

/// Walks the nodes of one level.
pub(crate) struct Nodes<'a, T> {
    nodes: &'a [Option<SkipNode<T>>],
    cursor: Option<usize>,
    lvl: usize,
}

impl<'a, T> Clone for Nodes<'a, T> {
    fn clone(&self) -> Self {
        Nodes {
            nodes: self.nodes,
            cursor: self.cursor,
            lvl: self.lvl,
        }
    }
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = &'a SkipNode<T>;

    fn next(&mut self) -> Option<&'a SkipNode<T>> {
        let idx = self.cursor?;
        match self.nodes[idx] {
            Some(ref node) => {
                self.cursor = node.links[self.lvl];
                Some(node)
            }
            None => panic!("Encountered a vacant node."),
        }
    }
}

/// Ascending iterator over the values of one level of a `SkipList`.
pub struct Iter<'a, T> {
    inner: Nodes<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|node| &node.value)
    }
}

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Tests
// /////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
impl<T, G> SkipList<T, G>
where
    T: PartialOrd + fmt::Debug,
{
    fn chain(&self, lvl: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cursor = self.heads[lvl];
        while let Some(idx) = cursor {
            out.push(idx);
            cursor = self.node(idx).links[lvl];
        }
        out
    }

    /// Checks the integrity of the skiplist.
    fn check(&self) {
        assert_eq!(self.nodes.iter().filter(|n| n.is_some()).count(), self.len);
        assert_eq!(self.nodes.len() - self.free.len(), self.len);
        if self.len == 0 {
            assert!(self.heads.is_empty());
            return;
        }

        let base = self.chain(0);
        assert_eq!(base.len(), self.len);
        let tallest = base.iter().map(|&idx| self.node(idx).levels()).max().unwrap();
        assert_eq!(self.heads.len(), tallest);

        for lvl in 0..self.heads.len() {
            assert!(self.heads[lvl].is_some(), "empty lane {}", lvl);
            let lane = self.chain(lvl);
            let expected: Vec<usize> = base
                .iter()
                .cloned()
                .filter(|&idx| self.node(idx).levels() > lvl)
                .collect();
            assert_eq!(lane, expected, "lane {}", lvl);
            for pair in lane.windows(2) {
                let (a, b) = (&self.node(pair[0]).value, &self.node(pair[1]).value);
                assert_eq!(compare(a, b), Ok(Ordering::Less), "{:?} !< {:?}", a, b);
            }
        }
    }
}
