use super::{Client, Reject};
use crate::error::Result;
use crate::stream::EventStream;
use crate::types::{
    AccountID, Transaction, TransactionID, TransactionPagesResponse, TransactionRangeQuery, TransactionResponse,
    TransactionsQuery, TransactionsResponse, TransactionsSinceQuery,
};

impl Client {
    /// Page URLs for Transactions in a time range.
    pub async fn transaction_pages(
        &self,
        account: &AccountID,
        query: &TransactionsQuery,
    ) -> Result<TransactionPagesResponse> {
        self.get_with(&["accounts", account.as_str(), "transactions"], query, Reject::Api)
            .await
    }

    pub async fn transaction(&self, account: &AccountID, id: &TransactionID) -> Result<TransactionResponse> {
        self.get(&["accounts", account.as_str(), "transactions", id.as_str()])
            .await
    }

    /// Transactions with IDs in `[from, to]`.
    pub async fn transaction_range(
        &self,
        account: &AccountID,
        query: &TransactionRangeQuery,
    ) -> Result<TransactionsResponse> {
        self.get_with(&["accounts", account.as_str(), "transactions", "idrange"], query, Reject::Api)
            .await
    }

    /// Transactions created after `query.id`.
    pub async fn transactions_since(
        &self,
        account: &AccountID,
        query: &TransactionsSinceQuery,
    ) -> Result<TransactionsResponse> {
        self.get_with(&["accounts", account.as_str(), "transactions", "sinceid"], query, Reject::Api)
            .await
    }

    /// Stream the account's Transactions as they are created.
    pub async fn transaction_stream(&self, account: &AccountID) -> Result<EventStream<Transaction>> {
        self.open_stream(&["accounts", account.as_str(), "transactions", "stream"], &())
            .await
    }
}
