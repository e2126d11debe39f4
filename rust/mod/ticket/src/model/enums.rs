use serde::{Deserialize, Serialize};

/// Declare a closed vocabulary whose variants travel as SCREAMING_SNAKE_CASE
/// strings, both on the wire and in SQL columns.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// What kind of problem a ticket is about.
    pub enum Category {
        InternetWan => "INTERNET_WAN",
        LanWifi => "LAN_WIFI",
        Pos => "POS",
        PrinterBarcode => "PRINTER_BARCODE",
        PcTablet => "PC_TABLET",
        AccountAccess => "ACCOUNT_ACCESS",
        AppServer => "APP_SERVER",
        Other => "OTHER",
    }
}

wire_enum! {
    /// How badly the problem hurts the store.
    pub enum Impact {
        SalesStopped => "SALES_STOPPED",
        Partial => "PARTIAL",
        Info => "INFO",
    }
}

wire_enum! {
    /// Urgency. `P4` is only ever set by an admin.
    pub enum Priority {
        P1 => "P1",
        P2 => "P2",
        P3 => "P3",
        P4 => "P4",
    }
}

wire_enum! {
    /// Ticket lifecycle state.
    ///
    /// ```text
    /// OPEN → IN_PROGRESS → WAITING_STORE → RESOLVED → CLOSED
    /// ```
    ///
    /// The order is conventional only; admins may set any state at any time.
    pub enum Status {
        Open => "OPEN",
        InProgress => "IN_PROGRESS",
        WaitingStore => "WAITING_STORE",
        Resolved => "RESOLVED",
        Closed => "CLOSED",
    }
}

wire_enum! {
    /// Why a ticket was closed.
    pub enum CloseCode {
        Fixed => "FIXED",
        UserError => "USER_ERROR",
        Vendor => "VENDOR",
        Duplicate => "DUPLICATE",
        CannotReproduce => "CANNOT_REPRODUCE",
        Other => "OTHER",
    }
}

wire_enum! {
    /// Who wrote a comment or uploaded an attachment.
    pub enum AuthorRole {
        Admin => "ADMIN",
        Store => "STORE",
    }
}

impl Impact {
    /// Priority a fresh ticket gets for this impact.
    pub fn priority(&self) -> Priority {
        derive_priority(self.as_str())
    }
}

/// Map an impact wire string to the initial priority.
///
/// Unknown impacts fall back to `P3`.
pub fn derive_priority(impact: &str) -> Priority {
    match Impact::parse(impact) {
        Some(Impact::SalesStopped) => Priority::P1,
        Some(Impact::Partial) => Priority::P2,
        Some(Impact::Info) | None => Priority::P3,
    }
}
