mod deck;
mod nav_bar;
mod status_bar;

pub use deck::DeckWidget;
pub use nav_bar::NavBarWidget;
pub use status_bar::StatusBarWidget;
