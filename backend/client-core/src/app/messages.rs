pub const MENU_TITLE_SIGN_IN: &str = "Sign in";
pub const MENU_TITLE_SIGN_OUT: &str = "Sign out";

pub const SIGN_IN_SUCCESS_MESSAGE: &str = "Signed in successfully.";
pub const SIGN_UP_SUCCESS_MESSAGE: &str = "Signed up successfully. Please sign in.";
pub const SIGN_OUT_SUCCESS_MESSAGE: &str = "Signed out successfully.";
pub const SIGN_OUT_CONFIRM_MESSAGE: &str = "Are you sure you want to sign out?";
pub const STATION_CREATED_MESSAGE: &str = "Station added.";
pub const LINE_CREATED_MESSAGE: &str = "Line added.";
