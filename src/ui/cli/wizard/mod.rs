mod wizard;

pub use wizard::{collect_params, prompt_choice};
