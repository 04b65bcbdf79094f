use clap::ValueEnum;

/// Which bundle to configure
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Side {
    /// Browser bundle
    #[value(name = "client")]
    Client,

    /// Game server bundle
    #[value(name = "server")]
    Server,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Mode {
    #[value(name = "development")]
    Development,

    #[value(name = "production")]
    Production,

    /// Test runs skip the index.html check, the buffer polyfill and dist creation
    #[value(name = "test")]
    Test,
}

/// Project type
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ProjectKind {
    /// Single player; client and server ship together
    #[value(name = "rpg")]
    Rpg,

    /// Multiplayer; client and server are separate bundles
    #[value(name = "mmorpg")]
    Mmorpg,
}

impl From<Side> for rpgkit_config::Side {
    fn from(side: Side) -> Self {
        match side {
            Side::Client => rpgkit_config::Side::Client,
            Side::Server => rpgkit_config::Side::Server,
        }
    }
}

impl From<Mode> for rpgkit_config::Mode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Development => rpgkit_config::Mode::Development,
            Mode::Production => rpgkit_config::Mode::Production,
            Mode::Test => rpgkit_config::Mode::Test,
        }
    }
}

impl From<ProjectKind> for rpgkit_config::ProjectType {
    fn from(kind: ProjectKind) -> Self {
        match kind {
            ProjectKind::Rpg => rpgkit_config::ProjectType::Rpg,
            ProjectKind::Mmorpg => rpgkit_config::ProjectType::Mmorpg,
        }
    }
}
