pub use crate::error::*;

mod auth;
mod database;
mod descriptor;
mod entity;
mod error;
mod ledger;
mod modify;
mod query;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
    pub mod descriptor {
        pub use crate::descriptor::*;
    }
    pub mod ledger {
        pub use crate::ledger::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod auth {
        pub use crate::auth::*;
    }
    pub mod database {
        pub use crate::database::*;
    }
    pub mod query {
        pub use crate::query::*;
    }
    pub mod update {
        pub use crate::modify::*;
    }
}
