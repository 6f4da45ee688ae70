mod menu_form;
mod menu_tree;
mod root_select;

pub use menu_form::MenuForm;
pub use menu_tree::MenuTree;
pub use root_select::RootSelect;
