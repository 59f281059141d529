mod empty_state;

pub(crate) use empty_state::render_empty_state;
