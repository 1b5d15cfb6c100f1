#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// # Mock Base Token
///
/// **Role:** ERC-20 style stand-in for the collateral base token on test
/// networks.  Supply is created in exactly two ways:
///
/// ```text
///   [owner] ──owner_mint(n)──────────────► owner balance += n
///   [owner] ──set_mock_strategy(S)──► slot
///   [S]     ──mint(to, n)────────────────► balance(to) += n
/// ```
///
/// The strategy slot starts at the zero account.  While it holds the zero
/// account nobody may call `mint`.
#[ink::contract]
mod mock_base_token {
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    // =========================================================================
    // CONSTANTS
    // =========================================================================

    pub const TOKEN_NAME: &str = "Mock Base Token";
    pub const TOKEN_SYMBOL: &str = "MBT";
    pub const TOKEN_DECIMALS: u8 = 18;

    /// The all-zero account.  Never a valid strategy or owner.
    pub const ZERO_ADDRESS: [u8; 32] = [0u8; 32];

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct MockBaseToken {
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,
        total_supply: Balance,

        /// Administrator: configures the strategy slot and may self-mint.
        owner: AccountId,

        /// The single account allowed to call `mint`.
        mock_strategy: AccountId,

        name: String,
        symbol: String,
        decimals: u8,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: Option<AccountId>,
        #[ink(topic)]
        to: Option<AccountId>,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        value: Balance,
    }

    /// Emitted on every `set_mock_strategy`, including no-op overwrites.
    #[ink(event)]
    pub struct MockStrategyUpdated {
        #[ink(topic)]
        strategy: AccountId,
    }

    #[ink(event)]
    pub struct OwnershipTransferred {
        #[ink(topic)]
        previous_owner: AccountId,
        #[ink(topic)]
        new_owner: AccountId,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller is not the contract owner.
        NotOwner,
        /// Caller is not the configured mock strategy.
        NotMockStrategy,
        /// Ownership cannot be handed to the zero account.
        NewOwnerIsZeroAddress,
        /// Sender balance is lower than the transfer amount.
        InsufficientBalance,
        /// Spender allowance is lower than the transfer amount.
        InsufficientAllowance,
        /// An arithmetic operation overflowed.
        Overflow,
    }

    impl Error {
        /// Human-readable revert reason for this error.
        pub fn reason(&self) -> &'static str {
            match self {
                Error::NotOwner => "Ownable: caller is not the owner",
                Error::NotMockStrategy => "Caller is not MockStrategy",
                Error::NewOwnerIsZeroAddress => "Ownable: new owner is the zero address",
                Error::InsufficientBalance => "ERC20: transfer amount exceeds balance",
                Error::InsufficientAllowance => "ERC20: insufficient allowance",
                Error::Overflow => "Arithmetic overflow",
            }
        }
    }

    impl core::fmt::Display for Error {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str(self.reason())
        }
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl MockBaseToken {
        /// Deploy with zero supply.  The deployer becomes the owner and the
        /// strategy slot is left at the zero account.
        #[ink(constructor)]
        pub fn new() -> Self {
            Self {
                balances: Mapping::default(),
                allowances: Mapping::default(),
                total_supply: 0,
                owner: Self::env().caller(),
                mock_strategy: AccountId::from(ZERO_ADDRESS),
                name: String::from(TOKEN_NAME),
                symbol: String::from(TOKEN_SYMBOL),
                decimals: TOKEN_DECIMALS,
            }
        }

        // =====================================================================
        // ROLE-GATED SUPPLY
        // =====================================================================

        /// Point the strategy slot at `strategy`.  Any value is accepted,
        /// including the zero account and the value already stored.
        #[ink(message)]
        pub fn set_mock_strategy(&mut self, strategy: AccountId) -> Result<(), Error> {
            self.only_owner()?;
            self.mock_strategy = strategy;
            self.env().emit_event(MockStrategyUpdated { strategy });
            Ok(())
        }

        #[ink(message)]
        pub fn get_mock_strategy(&self) -> AccountId {
            self.mock_strategy
        }

        /// Mint `amount` to `to`.  Only the current strategy may call this.
        #[ink(message)]
        pub fn mint(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            self.only_mock_strategy()?;
            self.mint_impl(to, amount)
        }

        /// Mint `amount` straight into the owner's balance.
        #[ink(message)]
        pub fn owner_mint(&mut self, amount: Balance) -> Result<(), Error> {
            self.only_owner()?;
            let owner = self.owner;
            self.mint_impl(owner, amount)
        }

        // =====================================================================
        // ERC-20
        // =====================================================================

        #[ink(message)]
        pub fn name(&self) -> String {
            self.name.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.symbol.clone()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            self.decimals
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, account: AccountId) -> Balance {
            self.balances.get(account).unwrap_or(0)
        }

        #[ink(message)]
        pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
            self.allowances.get((owner, spender)).unwrap_or(0)
        }

        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, value: Balance) -> Result<(), Error> {
            let from = self.env().caller();
            self.transfer_impl(from, to, value)
        }

        #[ink(message)]
        pub fn approve(&mut self, spender: AccountId, value: Balance) -> Result<(), Error> {
            let owner = self.env().caller();
            self.allowances.insert((owner, spender), &value);
            self.env().emit_event(Approval { owner, spender, value });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            let caller = self.env().caller();
            let allowance = self.allowance(from, caller);
            if allowance < value {
                return Err(Error::InsufficientAllowance);
            }
            self.transfer_impl(from, to, value)?;
            self.allowances.insert((from, caller), &(allowance - value));
            Ok(())
        }

        // =====================================================================
        // OWNERSHIP
        // =====================================================================

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        #[ink(message)]
        pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<(), Error> {
            self.only_owner()?;
            if new_owner == AccountId::from(ZERO_ADDRESS) {
                return Err(Error::NewOwnerIsZeroAddress);
            }
            let previous_owner = self.owner;
            self.owner = new_owner;
            self.env().emit_event(OwnershipTransferred {
                previous_owner,
                new_owner,
            });
            Ok(())
        }

        // =====================================================================
        // INTERNAL HELPERS
        // =====================================================================

        fn mint_impl(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            // Compute both sums before writing so an overflow leaves no trace.
            let new_supply = self.total_supply.checked_add(amount).ok_or(Error::Overflow)?;
            let new_balance = self
                .balance_of(to)
                .checked_add(amount)
                .ok_or(Error::Overflow)?;

            self.total_supply = new_supply;
            self.balances.insert(to, &new_balance);
            self.env().emit_event(Transfer {
                from: None,
                to: Some(to),
                value: amount,
            });
            Ok(())
        }

        fn transfer_impl(&mut self, from: AccountId, to: AccountId, value: Balance) -> Result<(), Error> {
            let from_balance = self.balance_of(from);
            if from_balance < value {
                return Err(Error::InsufficientBalance);
            }
            if from != to {
                let to_balance = self.balance_of(to).checked_add(value).ok_or(Error::Overflow)?;
                self.balances.insert(from, &(from_balance - value));
                self.balances.insert(to, &to_balance);
            }
            self.env().emit_event(Transfer {
                from: Some(from),
                to: Some(to),
                value,
            });
            Ok(())
        }

        fn only_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::NotOwner);
            }
            Ok(())
        }

        fn only_mock_strategy(&self) -> Result<(), Error> {
            let strategy = self.mock_strategy;
            if strategy == AccountId::from(ZERO_ADDRESS) || self.env().caller() != strategy {
                return Err(Error::NotMockStrategy);
            }
            Ok(())
        }
    }

    impl Default for MockBaseToken {
        fn default() -> Self {
            Self::new()
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
