pub mod limits {

    pub const MAX_TITLE_LEN: usize = 60;

    pub const MAX_YEAR_LEN: usize = 4;

    pub const MAX_NAME_LEN: usize = 20;

    pub const MAX_USERNAME_LEN: usize = 20;
}

pub mod session {

    /// How often expired session records are purged from the database.
    pub const CLEANUP_INTERVAL_SECS: u64 = 60;
}

pub mod flash {

    pub const INVALID_INPUT: &str = "Invalid input.";

    pub const ITEM_CREATED: &str = "Item created.";

    pub const ITEM_UPDATED: &str = "Item updated.";

    pub const ITEM_DELETED: &str = "Item deleted.";

    pub const SETTINGS_UPDATED: &str = "Settings updated.";

    pub const LOGIN_SUCCESS: &str = "Login success.";

    pub const BAD_CREDENTIALS: &str = "Invalid username or password.";

    pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";

    pub const GOODBYE: &str = "Goodbye.";
}

pub mod forge {

    pub const OWNER_NAME: &str = "Grey Li";

    pub const ADMIN_NAME: &str = "Admin";

    pub const SAMPLE_MOVIES: &[(&str, &str)] = &[
        ("My Neighbor Totoro", "1988"),
        ("Dead Poets Society", "1989"),
        ("A Perfect World", "1993"),
        ("Leon", "1994"),
        ("Mahjong", "1996"),
        ("Swallowtail Butterfly", "1996"),
        ("King of Comedy", "1999"),
        ("Devils on the Doorstep", "1999"),
        ("WALL-E", "2008"),
        ("The Pork of Music", "2012"),
    ];
}
