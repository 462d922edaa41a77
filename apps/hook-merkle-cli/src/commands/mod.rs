pub mod build_trees;
pub mod verify_dump;
