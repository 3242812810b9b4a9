mod component;
mod frame_loop;
mod render;
mod state;
mod types;

pub use component::TechStackGraph;
pub use state::LayoutParams;
pub use types::{GRAPH_TAG, GraphSpec};
