mod grid_line;

pub(crate) use grid_line::GridLine;
