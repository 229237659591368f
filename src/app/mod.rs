// Commands shared by the `portfolio-sheets` and `portfolio-toml` binaries.

pub mod commands;
