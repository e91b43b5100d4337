use super::{Client, Reject};
use crate::error::Result;
use crate::types::{
    AccountChangesQuery, AccountChangesResponse, AccountConfigurationRequest, AccountID, AccountInstrumentsQuery,
    AccountInstrumentsResponse, AccountProperties, AccountResponse, AccountSummaryResponse, AccountsResponse,
    ConfigureAccountResponse, TransactionID,
};
use reqwest::Method;

impl Client {
    /// Accounts the token is authorized for.
    pub async fn accounts(&self) -> Result<Vec<AccountProperties>> {
        let response: AccountsResponse = self.get(&["accounts"]).await?;
        Ok(response.accounts)
    }

    /// Full account details, including open trades, positions and pending orders.
    pub async fn account(&self, account: &AccountID) -> Result<AccountResponse> {
        self.get(&["accounts", account.as_str()]).await
    }

    pub async fn account_summary(&self, account: &AccountID) -> Result<AccountSummaryResponse> {
        self.get(&["accounts", account.as_str(), "summary"]).await
    }

    /// Tradeable instruments for the account, optionally limited to a list.
    pub async fn account_instruments(
        &self,
        account: &AccountID,
        query: &AccountInstrumentsQuery,
    ) -> Result<AccountInstrumentsResponse> {
        self.get_with(&["accounts", account.as_str(), "instruments"], query, Reject::Api)
            .await
    }

    /// Set the client-configurable parts of the account (alias, margin rate).
    pub async fn configure_account(
        &self,
        account: &AccountID,
        request: &AccountConfigurationRequest,
    ) -> Result<ConfigureAccountResponse> {
        self.send(
            Method::PATCH,
            &["accounts", account.as_str(), "configuration"],
            request,
            Reject::AccountConfiguration,
        )
        .await
    }

    /// Changes and price-dependent state since `since`. Pass the returned
    /// `last_transaction_id` back in to poll without gaps.
    pub async fn account_changes(&self, account: &AccountID, since: &TransactionID) -> Result<AccountChangesResponse> {
        self.get_with(
            &["accounts", account.as_str(), "changes"],
            &AccountChangesQuery::since(since),
            Reject::Api,
        )
        .await
    }
}
