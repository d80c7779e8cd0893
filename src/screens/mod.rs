//! Screens module
//!
//! View logic of the client. Rendering belongs to the host UI; each screen
//! here turns store snapshots into plain view data and maps user actions to
//! store calls, toasts and navigation.

pub mod auth;
pub mod forms;
pub mod home;
pub mod navbar;
pub mod navigation;
pub mod no_internet;
pub mod pagination;

pub use auth::{LoginScreen, SignupScreen};
pub use forms::{LoginForm, SignupForm};
pub use home::{HomeScreen, HomeView, SubjectCard};
pub use navbar::{MenuItem, Navbar};
pub use navigation::{NavigationStack, Navigator, Route};
pub use no_internet::NoInternetScreen;
pub use pagination::{Pager, PAGE_WINDOW, TESTS_PER_PAGE};
pub use subject_tests::{sort_newest_first, PagerView, SubjectTestsScreen, SubjectTestsView, TestRow};
