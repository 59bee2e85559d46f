pub mod dialog;
pub mod help_popup;
pub mod keybinds;
pub mod tree_view;
pub mod ui;
