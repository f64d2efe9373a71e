#[path = "template_config.rs"]
mod template_config;
#[path = "template_keybindings.rs"]
mod template_keybindings;

pub use template_config::generate_config;
pub use template_keybindings::generate_keybindings;

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
