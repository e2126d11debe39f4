mod audit;
mod device;
mod enums;
mod report;
mod store;
mod ticket;

pub use audit::{AuditEntry, AuditFilter, RecordAudit, TICKET_CREATE};
pub use device::{CreateDevice, Device, UpdateDevice};
pub use enums::{derive_priority, AuthorRole, Category, CloseCode, Impact, Priority, Status};
pub use report::{CategoryCount, DayCount, Overview, StoreCategoryCount, StoreCount, Timeline};
pub use store::{AdminLogin, CreateStore, PinReset, Store, StoreLogin, UpdateStore};
pub use ticket::{
    Attachment, Comment, CreateComment, CreateTicket, Ticket, TicketDetail, TicketFilter,
    UpdateTicket, Upload,
};
