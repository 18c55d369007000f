// ABOUTME: UI components for the terminal wizard

pub mod wizard_screen;

pub use wizard_screen::WizardScreen;
