pub mod acknowledgement;
pub mod health;
pub mod notification_payload;
pub mod received_notification;
pub mod sent_notification;
