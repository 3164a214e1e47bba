/// Defines the decision tree learner.
pub mod dtree;
/// Defines the classifier produced by `DecisionTree`.
pub mod classifier;
/// Defines the builder of `DecisionTree`.
pub mod builder;

/// Defines the inner representations of `DecisionTreeClassifier`.
mod node;
mod criterion;
mod split_rule;


pub use classifier::DecisionTreeClassifier;
pub use builder::DecisionTreeBuilder;
pub use dtree::DecisionTree;
pub use criterion::Criterion;
