use crate::repository::Repository;
use crate::service::account::AccountService;
use crate::service::message::MessageService;

#[derive(Debug, Clone)]
#[must_use]
pub struct SharedState {
    pub accounts: AccountService,
    pub messages: MessageService,
}

impl SharedState {
    pub fn new(repository: Repository) -> Self {
        let Repository { accounts, messages } = repository;
        Self {
            accounts: AccountService::new(accounts.clone()),
            messages: MessageService::new(messages, accounts),
        }
    }
}
