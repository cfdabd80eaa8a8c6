mod viewer;

pub use viewer::ViewerPanel;
