//! Chart intent dispatch.
//!
//! The backend may attach a `{type, x, y}` descriptor to a result set. The
//! dispatcher turns that descriptor plus the rows into a [`ChartView`], a
//! plain description of what to plot, and [`draw`] turns a view into text
//! for the terminal.

mod dispatch;
mod draw;
mod spec;

pub use dispatch::{
    CartesianChart, CartesianStyle, ChartView, DataPoint, PALETTE, PieChart, PieSlice,
    SERIES_COLOR, SCATTER_COLOR, dispatch,
};
pub use draw::{DrawOptions, draw};
pub use spec::{ChartKind, ChartSpec, Row};
