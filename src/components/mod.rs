//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod card_grid;
pub mod detail_dialog;
pub mod help_dialog;
pub mod home;
pub mod index_bar;
pub mod layout;
pub mod quit_dialog;
pub mod splash;
pub mod text;

pub use detail_dialog::DetailDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use splash::SplashComponent;
