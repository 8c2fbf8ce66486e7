use crate::classifiers::decision_tree::decision_tree::DecisionTree;
use crate::classifiers::decision_tree::nodes::Node;
use std::fmt::{self, Display, Formatter, Write};

const INDENT: &str = "|   ";

/// Indented, read-only rendering of a fitted tree.
///
/// ```text
/// outlook = overcast: yes [4]
/// outlook = sunny [5]
/// |   humidity = high: no [3]
/// |   humidity = normal: yes [2]
/// ```
///
/// Counts are the number of training rows that reached the node; they are
/// omitted for trees loaded from JSON.
pub struct TreePrinter<'a> {
    tree: &'a DecisionTree,
}

impl<'a> TreePrinter<'a> {
    pub fn new(tree: &'a DecisionTree) -> Self {
        Self { tree }
    }

    fn feature_name(&self, index: usize) -> String {
        self.tree
            .feature_names()
            .and_then(|names| names.get(index))
            .cloned()
            .unwrap_or_else(|| format!("feature_{index}"))
    }

    fn write_node(&self, out: &mut String, node: &Node, level: usize) -> fmt::Result {
        let Node::Split {
            feature_index,
            children,
            ..
        } = node
        else {
            return Ok(());
        };

        let name = self.feature_name(*feature_index);
        for (value, child) in children {
            out.push_str(&INDENT.repeat(level));
            write!(out, "{name} = {value}")?;
            if child.is_leaf() {
                write!(out, ": {}", child.class())?;
            }
            write_count(out, child)?;
            out.push('\n');
            self.write_node(out, child, level + 1)?;
        }
        Ok(())
    }
}

fn write_count(out: &mut String, node: &Node) -> fmt::Result {
    let n = node.samples().len();
    if n > 0 {
        write!(out, " [{n}]")?;
    }
    Ok(())
}

impl Display for TreePrinter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Some(root) = self.tree.root() else {
            return writeln!(f, "(empty tree)");
        };

        let mut out = String::new();
        if root.is_leaf() {
            write!(out, "{}", root.class())?;
            write_count(&mut out, root)?;
            out.push('\n');
        } else {
            self.write_node(&mut out, root, 0)?;
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::Classifier;
    use crate::testing::fixtures::{WEATHER_FEATURE_NAMES, strings, table, weather};

    #[test]
    fn test_unfitted_tree_prints_placeholder() {
        let tree = DecisionTree::new();
        assert_eq!(TreePrinter::new(&tree).to_string(), "(empty tree)\n");
    }

    #[test]
    fn test_single_leaf_prints_class_and_count() {
        let mut tree = DecisionTree::new();
        tree.fit(table(&[&["a"], &["b"]]), strings(&["k", "k"]))
            .unwrap();
        assert_eq!(TreePrinter::new(&tree).to_string(), "k [2]\n");
    }

    #[test]
    fn test_weather_tree_rendering() {
        let (features, labels) = weather();
        let mut tree = DecisionTree::new();
        tree.set_feature_names(strings(&WEATHER_FEATURE_NAMES));
        tree.fit(features, labels).unwrap();

        let expected = "\
outlook = overcast: yes [4]
outlook = rainy [5]
|   windy = false: yes [3]
|   windy = true: no [2]
outlook = sunny [5]
|   humidity = high: no [3]
|   humidity = normal: yes [2]
";
        assert_eq!(TreePrinter::new(&tree).to_string(), expected);
    }

    #[test]
    fn test_missing_names_fall_back_to_indices() {
        let (features, labels) = weather();
        let mut tree = DecisionTree::new();
        tree.fit(features, labels).unwrap();

        let text = TreePrinter::new(&tree).to_string();
        assert!(text.starts_with("feature_0 = overcast: yes [4]\n"));
        assert!(text.contains("|   feature_2 = high: no [3]\n"));
    }
}
