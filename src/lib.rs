pub mod app;
pub mod config;
pub mod observability;

pub mod common {
    pub mod command;
    pub mod error;
    pub mod money;
}

pub mod domain {
    pub mod catalog;
    pub mod customer;
    pub mod ledger;
    pub mod sale;
}

pub mod io {
    pub mod reader;
    pub mod writer;
}

pub mod worker {
    pub mod processor;

    pub mod handlers {
        pub mod catalog;
        pub mod customer;
        pub mod report;
        pub mod sale;
    }
}
