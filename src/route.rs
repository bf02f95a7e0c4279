// Pathname dispatch. Pure so it can be tested on the host.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Radio,
    Player,
    Archive,
}

impl Route {
    /// Trailing slashes are ignored; unknown paths fall back to home.
    pub fn from_path(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "/radio" => Route::Radio,
            "/trackplayer" => Route::Player,
            "/archive" => Route::Archive,
            _ => Route::Home,
        }
    }

    /// Every page but home opens behind the loading screen.
    pub fn shows_loading_screen(self) -> bool {
        self != Route::Home
    }
}
