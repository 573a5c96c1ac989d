//! Exact-name search over the whole tree.

use crate::fs::RamFs;
use crate::node::Node;

impl RamFs {
    /// Returns the paths of every node named exactly `keyword`, sorted
    /// byte-wise.
    ///
    /// The root never matches. Matching directories are reported without a
    /// trailing slash. No match yields an empty vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_core::RamFs;
    ///
    /// let mut fs = RamFs::new();
    /// fs.create_dir("/x").unwrap();
    /// fs.create("/x/y").unwrap();
    /// fs.create_dir("/z").unwrap();
    /// fs.create("/z/y").unwrap();
    ///
    /// assert_eq!(fs.find("y"), vec!["/x/y", "/z/y"]);
    /// assert!(fs.find("nothing").is_empty());
    /// ```
    #[must_use]
    pub fn find(&self, keyword: &str) -> Vec<String> {
        let mut results = Vec::new();
        if let Some(root) = self.node(self.root()) {
            let mut prefix = String::from("/");
            self.collect_matches(root, &mut prefix, keyword, &mut results);
        }
        results.sort_unstable();
        tracing::debug!(keyword, matches = results.len(), "find");
        results
    }

    // Pre-order walk. `prefix` is the directory's path with a trailing slash
    // and is restored before returning.
    fn collect_matches(
        &self,
        dir: &Node,
        prefix: &mut String,
        keyword: &str,
        results: &mut Vec<String>,
    ) {
        let Some(children) = dir.children() else {
            return;
        };

        for &child_id in children.values() {
            let Some(child) = self.node(child_id) else {
                continue;
            };
            let Some(name) = child.name() else {
                continue;
            };

            let mark = prefix.len();
            prefix.push_str(name);
            if name == keyword {
                results.push(prefix.clone());
            }
            if child.is_dir() {
                prefix.push('/');
                self.collect_matches(child, prefix, keyword, results);
            }
            prefix.truncate(mark);
        }
    }
}
