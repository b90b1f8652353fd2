/// A self-balancing red-black tree of keyed records with a
/// client-supplied ordering and duplicates policy.
pub mod red_black_tree;
