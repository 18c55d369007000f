// ABOUTME: Setup wizard core: pages, view abstraction, navigation controller, and
// account verification. Nothing here depends on the terminal.

pub mod controller;
pub mod page;
pub mod paths;
pub mod settings;
pub mod strings;
pub mod verify;
pub mod view;

pub use controller::{Direction, WizardController, WizardError};
pub use page::{default_pages, Control, ControlKind, FeatureFlag, FeatureFlags, Page, Visibility};
pub use paths::{PathFilter, ValidatedPath};
pub use settings::WizardSettings;
pub use strings::Strings;
pub use verify::{
    Credentials, HttpVerifier, NoopDispatcher, VerificationDispatcher, VerificationResponse,
    VerifyClient, VerifyError,
};
pub use view::{FormView, WizardView};
