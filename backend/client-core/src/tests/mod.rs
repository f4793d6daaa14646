mod cache;
mod events;
mod history;
mod router;
mod session;
mod view;
