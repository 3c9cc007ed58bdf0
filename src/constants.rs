pub const DEFAULT_SOURCE: &str = "direct";

pub mod fallback {

    pub const CTA: &str = "Get Early Access";

    pub const FEATURES: &[&str] = &["Innovative solution", "Easy to use", "Game-changing results"];

    /// Shown on the analytics panel until real feedback arrives.
    pub const QUOTES: &[&str] = &[
        "This is exactly what I needed!",
        "Finally, a tool that makes sense.",
        "I'd definitely pay for this service.",
    ];
}

pub mod limits {

    pub const RECENT_SIGNUPS: usize = 5;

    pub const RECENT_QUOTES: usize = 3;

    pub const MIN_RATING: i64 = 1;

    pub const MAX_RATING: i64 = 5;
}

/// Keys the browser mirror writes under in `localStorage`.
pub mod storage_keys {

    pub const STARTUP_IDEAS: &str = "instant-validation-startup-ideas";

    pub const SIGNUPS: &str = "instant-validation-signups";
}
