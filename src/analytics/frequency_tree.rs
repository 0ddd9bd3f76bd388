use std::cmp::Ordering;

type Link = Option<Box<FrequencyNode>>;

#[derive(Debug)]
pub struct FrequencyNode {
    pub term: String,
    pub count: u64,
    height: i32,
    left: Link,
    right: Link,
}

impl FrequencyNode {
    fn new(term: &str) -> Box<Self> {
        Box::new(FrequencyNode {
            term: term.to_string(),
            count: 1,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Left height minus right height
    fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

fn height(link: &Link) -> i32 {
    link.as_ref().map_or(0, |node| node.height)
}

fn rotate_right(mut y: Box<FrequencyNode>) -> Box<FrequencyNode> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

fn rotate_left(mut x: Box<FrequencyNode>) -> Box<FrequencyNode> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Restores |balance| <= 1 at `node` after an insert below it
fn rebalance(mut node: Box<FrequencyNode>) -> Box<FrequencyNode> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        // Left-right: straighten the left child first
        if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        // Right-left
        if node.right.as_ref().is_some_and(|right| right.balance_factor() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

/// Returns the new subtree root and the term's count after the insert
fn insert_node(link: Link, term: &str) -> (Box<FrequencyNode>, u64) {
    let mut node = match link {
        Some(node) => node,
        None => return (FrequencyNode::new(term), 1),
    };

    let count = match term.cmp(node.term.as_str()) {
        Ordering::Equal => {
            // Repeat occurrence: no structural change
            node.count += 1;
            let count = node.count;
            return (node, count);
        }
        Ordering::Less => {
            let (child, count) = insert_node(node.left.take(), term);
            node.left = Some(child);
            count
        }
        Ordering::Greater => {
            let (child, count) = insert_node(node.right.take(), term);
            node.right = Some(child);
            count
        }
    };

    (rebalance(node), count)
}

/// AVL tree of search term -> occurrence count, ordered by byte-wise
/// string comparison. Terms are stored as given; folding is the caller's job.
#[derive(Debug, Default)]
pub struct FrequencyTree {
    root: Link,
    distinct: usize,
    total: u64,
}

impl FrequencyTree {
    pub fn new() -> Self {
        FrequencyTree {
            root: None,
            distinct: 0,
            total: 0,
        }
    }

    /// Count the term once; returns its new count
    pub fn insert(&mut self, term: &str) -> u64 {
        let (root, count) = insert_node(self.root.take(), term);
        self.root = Some(root);
        if count == 1 {
            self.distinct += 1;
        }
        self.total += 1;
        count
    }

    /// Occurrences of `term`, 0 when never inserted
    pub fn find(&self, term: &str) -> u64 {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match term.cmp(node.term.as_str()) {
                Ordering::Equal => return node.count,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        0
    }

    /// All (term, count) pairs in ascending term order
    pub fn in_order(&self) -> Vec<(String, u64)> {
        let mut entries = Vec::with_capacity(self.distinct);
        let mut stack: Vec<&FrequencyNode> = Vec::new();
        let mut current = self.root.as_deref();

        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                entries.push((node.term.clone(), node.count));
                current = node.right.as_deref();
            }
        }

        entries
    }

    /// Highest counts first; equal counts stay in ascending term order
    /// (stable sort over the in-order walk). `k == 0` returns everything.
    pub fn top_k(&self, k: usize) -> Vec<(String, u64)> {
        let mut entries = self.in_order();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        if k > 0 {
            entries.truncate(k);
        }
        entries
    }

    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Checks ordering, stored heights and the AVL balance bound on every node
    pub fn is_balanced(&self) -> bool {
        fn check(link: &Link, lower: Option<&str>, upper: Option<&str>) -> Option<i32> {
            let Some(node) = link else {
                return Some(0);
            };
            if lower.is_some_and(|lo| node.term.as_str() <= lo)
                || upper.is_some_and(|hi| node.term.as_str() >= hi)
            {
                return None;
            }
            let left = check(&node.left, lower, Some(node.term.as_str()))?;
            let right = check(&node.right, Some(node.term.as_str()), upper)?;
            let expected = 1 + left.max(right);
            if (left - right).abs() > 1 || node.height != expected {
                return None;
            }
            Some(expected)
        }

        check(&self.root, None, None).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_counts_repeat_occurrences() {
        let mut tree = FrequencyTree::new();
        assert_eq!(tree.insert("drive"), 1);
        assert_eq!(tree.insert("drive"), 2);
        assert_eq!(tree.insert("cloud"), 1);

        assert_eq!(tree.find("drive"), 2);
        assert_eq!(tree.find("cloud"), 1);
        assert_eq!(tree.find("absent"), 0);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.total(), 3);
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let mut tree = FrequencyTree::new();
        for i in 0..1000 {
            tree.insert(&format!("term{:04}", i));
            assert!(tree.is_balanced());
        }
        // AVL height bound: < 1.45 * log2(n + 2)
        assert!(tree.height() <= 14);
    }

    #[test]
    fn test_all_four_rotation_shapes() {
        for order in [["c", "b", "a"], ["a", "b", "c"], ["c", "a", "b"], ["a", "c", "b"]] {
            let mut tree = FrequencyTree::new();
            for term in order {
                tree.insert(term);
            }
            assert!(tree.is_balanced(), "unbalanced after {:?}", order);
            assert_eq!(tree.height(), 2);
            assert_eq!(tree.in_order().len(), 3);
        }
    }

    #[test]
    fn test_random_sequences_keep_invariant() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tree = FrequencyTree::new();
        let mut expected = std::collections::BTreeMap::new();

        for _ in 0..5000 {
            let term = format!("q{}", rng.gen_range(0..700));
            tree.insert(&term);
            *expected.entry(term).or_insert(0u64) += 1;
        }

        assert!(tree.is_balanced());
        let actual: Vec<(String, u64)> = tree.in_order();
        let wanted: Vec<(String, u64)> = expected.into_iter().collect();
        assert_eq!(actual, wanted);
    }

    #[test]
    fn test_top_k_orders_by_count_then_term() {
        let mut tree = FrequencyTree::new();
        for term in ["drive", "cloud", "drive", "box", "drive", "azure", "box"] {
            tree.insert(term);
        }

        assert_eq!(tree.top_k(2), vec![
            ("drive".to_string(), 3),
            ("box".to_string(), 2),
        ]);
        assert_eq!(tree.top_k(0), vec![
            ("drive".to_string(), 3),
            ("box".to_string(), 2),
            ("azure".to_string(), 1),
            ("cloud".to_string(), 1),
        ]);
        assert_eq!(tree.top_k(10).len(), 4);
    }

    #[test]
    fn test_empty_tree() {
        let tree = FrequencyTree::new();
        assert!(tree.is_empty());
        assert!(tree.top_k(5).is_empty());
        assert!(tree.is_balanced());
        assert_eq!(tree.find(""), 0);
    }
}
