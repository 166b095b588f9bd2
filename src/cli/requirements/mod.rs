//! Requirements command - prints the requirement list for a field

use clap::{Args, ValueEnum};

use crate::domain::validation::{password_requirements_list, username_requirements_list};

use super::{bootstrap, print_json};

/// Arguments for the requirements command
#[derive(Args, Clone)]
pub struct RequirementsArgs {
    /// Field to describe
    #[arg(value_enum)]
    pub field: RequirementsField,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RequirementsField {
    Username,
    Password,
}

/// Run the requirements command
pub fn run(args: RequirementsArgs) -> anyhow::Result<()> {
    let config = bootstrap();

    let requirements = match args.field {
        RequirementsField::Username => username_requirements_list(&config.validation.username),
        RequirementsField::Password => password_requirements_list(&config.validation.password),
    };

    print_json(&requirements)
}
