#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// # Collateral Deposit Record
///
/// **Role:** Bookkeeping for collateral deposits.  Allowed hook contracts
/// report every deposit and withdrawal; the record enforces two ceilings:
///
/// ```text
///   global_deposit_amount + amount  <= global_deposit_cap
///   net_deposit[sender]   + amount  <= account_deposit_cap
/// ```
///
/// Both caps are constructor arguments.  The owner may adjust them later and
/// decides which hooks may report.
#[ink::contract]
mod collateral_deposit_record {
    use ink::storage::Mapping;

    pub const ZERO_ADDRESS: [u8; 32] = [0u8; 32];

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct CollateralDepositRecord {
        owner: AccountId,

        // ── Ceilings ──────────────────────────────────────────────────────
        global_deposit_cap: Balance,
        account_deposit_cap: Balance,

        // ── Running totals ────────────────────────────────────────────────
        global_deposit_amount: Balance,
        account_to_net_deposit: Mapping<AccountId, Balance>,

        /// Contracts permitted to call `record_deposit` / `record_withdrawal`.
        allowed_hooks: Mapping<AccountId, bool>,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct DepositRecorded {
        #[ink(topic)]
        hook: AccountId,
        #[ink(topic)]
        sender: AccountId,
        amount: Balance,
        net_deposit: Balance,
        global_deposit_amount: Balance,
    }

    #[ink(event)]
    pub struct WithdrawalRecorded {
        #[ink(topic)]
        hook: AccountId,
        #[ink(topic)]
        sender: AccountId,
        amount: Balance,
        net_deposit: Balance,
        global_deposit_amount: Balance,
    }

    #[ink(event)]
    pub struct GlobalDepositCapChanged {
        cap: Balance,
    }

    #[ink(event)]
    pub struct AccountDepositCapChanged {
        cap: Balance,
    }

    #[ink(event)]
    pub struct AllowedHooksChanged {
        #[ink(topic)]
        hook: AccountId,
        allowed: bool,
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
        /// Caller is not an allowed hook.
        CallerNotAllowed,
        /// Deposit would push the global total above `global_deposit_cap`.
        GlobalDepositCapExceeded,
        /// Deposit would push the sender above `account_deposit_cap`.
        AccountDepositCapExceeded,
        /// Ownership cannot be handed to the zero account.
        NewOwnerIsZeroAddress,
        /// An arithmetic operation overflowed.
        Overflow,
    }

    impl Error {
        pub fn reason(&self) -> &'static str {
            match self {
                Error::NotOwner => "Ownable: caller is not the owner",
                Error::CallerNotAllowed => "Caller not allowed",
                Error::GlobalDepositCapExceeded => "Global deposit cap exceeded",
                Error::AccountDepositCapExceeded => "Account deposit cap exceeded",
                Error::NewOwnerIsZeroAddress => "Ownable: new owner is the zero address",
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

    impl CollateralDepositRecord {
        /// Deploy with both ceilings expressed in base units.
        #[ink(constructor)]
        pub fn new(global_deposit_cap: Balance, account_deposit_cap: Balance) -> Self {
            Self {
                owner: Self::env().caller(),
                global_deposit_cap,
                account_deposit_cap,
                global_deposit_amount: 0,
                account_to_net_deposit: Mapping::default(),
                allowed_hooks: Mapping::default(),
            }
        }

        // =====================================================================
        // HOOK ENTRY POINTS
        // =====================================================================

        /// Record a deposit of `amount` made by `sender`.
        ///
        /// The global cap is checked first, so a deposit that breaks both
        /// ceilings reports [`Error::GlobalDepositCapExceeded`].
        #[ink(message)]
        pub fn record_deposit(&mut self, sender: AccountId, amount: Balance) -> Result<(), Error> {
            self.only_allowed_hooks()?;

            let global = self
                .global_deposit_amount
                .checked_add(amount)
                .ok_or(Error::Overflow)?;
            if global > self.global_deposit_cap {
                return Err(Error::GlobalDepositCapExceeded);
            }

            let net = self
                .get_net_deposit(sender)
                .checked_add(amount)
                .ok_or(Error::Overflow)?;
            if net > self.account_deposit_cap {
                return Err(Error::AccountDepositCapExceeded);
            }

            self.global_deposit_amount = global;
            self.account_to_net_deposit.insert(sender, &net);

            self.env().emit_event(DepositRecorded {
                hook: self.env().caller(),
                sender,
                amount,
                net_deposit: net,
                global_deposit_amount: global,
            });
            Ok(())
        }

        /// Record a withdrawal.  Both totals floor at zero; withdrawing more
        /// than was recorded is not an error.
        #[ink(message)]
        pub fn record_withdrawal(&mut self, sender: AccountId, amount: Balance) -> Result<(), Error> {
            self.only_allowed_hooks()?;

            let global = self.global_deposit_amount.saturating_sub(amount);
            let net = self.get_net_deposit(sender).saturating_sub(amount);

            self.global_deposit_amount = global;
            self.account_to_net_deposit.insert(sender, &net);

            self.env().emit_event(WithdrawalRecorded {
                hook: self.env().caller(),
                sender,
                amount,
                net_deposit: net,
                global_deposit_amount: global,
            });
            Ok(())
        }

        // =====================================================================
        // VIEW FUNCTIONS
        // =====================================================================

        #[ink(message)]
        pub fn get_global_deposit_cap(&self) -> Balance {
            self.global_deposit_cap
        }

        #[ink(message)]
        pub fn get_account_deposit_cap(&self) -> Balance {
            self.account_deposit_cap
        }

        #[ink(message)]
        pub fn get_global_deposit_amount(&self) -> Balance {
            self.global_deposit_amount
        }

        #[ink(message)]
        pub fn get_net_deposit(&self, account: AccountId) -> Balance {
            self.account_to_net_deposit.get(account).unwrap_or(0)
        }

        #[ink(message)]
        pub fn is_hook_allowed(&self, hook: AccountId) -> bool {
            self.allowed_hooks.get(hook).unwrap_or(false)
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        // =====================================================================
        // ADMIN
        // =====================================================================

        /// Lowering the cap below the current total is allowed; it only
        /// blocks further deposits.
        #[ink(message)]
        pub fn set_global_deposit_cap(&mut self, cap: Balance) -> Result<(), Error> {
            self.only_owner()?;
            self.global_deposit_cap = cap;
            self.env().emit_event(GlobalDepositCapChanged { cap });
            Ok(())
        }

        #[ink(message)]
        pub fn set_account_deposit_cap(&mut self, cap: Balance) -> Result<(), Error> {
            self.only_owner()?;
            self.account_deposit_cap = cap;
            self.env().emit_event(AccountDepositCapChanged { cap });
            Ok(())
        }

        #[ink(message)]
        pub fn set_allowed_hook(&mut self, hook: AccountId, allowed: bool) -> Result<(), Error> {
            self.only_owner()?;
            if allowed {
                self.allowed_hooks.insert(hook, &true);
            } else {
                self.allowed_hooks.remove(hook);
            }
            self.env().emit_event(AllowedHooksChanged { hook, allowed });
            Ok(())
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
        // ACCESS CONTROL
        // =====================================================================

        fn only_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::NotOwner);
            }
            Ok(())
        }

        fn only_allowed_hooks(&self) -> Result<(), Error> {
            if !self.is_hook_allowed(self.env().caller()) {
                return Err(Error::CallerNotAllowed);
            }
            Ok(())
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

    #[cfg(test)]
    mod tests {
        use super::*;
        use ink::env::{test, DefaultEnvironment};

        type Env = DefaultEnvironment;

        const ONE: Balance = 1_000_000_000_000_000_000;
        const GLOBAL_CAP: Balance = 100_000 * ONE;
        const ACCOUNT_CAP: Balance = 1_000 * ONE;

        fn accounts() -> test::DefaultAccounts<Env> {
            test::default_accounts::<Env>()
        }

        fn set_caller(addr: AccountId) {
            test::set_caller::<Env>(addr);
        }

        /// Alice owns the record; Bob is registered as the hook.
        fn deploy() -> CollateralDepositRecord {
            let accs = accounts();
            set_caller(accs.alice);
            let mut record = CollateralDepositRecord::new(GLOBAL_CAP, ACCOUNT_CAP);
            record.set_allowed_hook(accs.bob, true).unwrap();
            set_caller(accs.bob);
            record
        }

        // ── Construction ──────────────────────────────────────────────────────

        #[ink::test]
        fn constructor_stores_caps() {
            set_caller(accounts().alice);
            let record = CollateralDepositRecord::new(GLOBAL_CAP, ACCOUNT_CAP);
            assert_eq!(record.get_global_deposit_cap(), GLOBAL_CAP);
            assert_eq!(record.get_account_deposit_cap(), ACCOUNT_CAP);
            assert_eq!(record.get_global_deposit_amount(), 0);
            assert_eq!(record.owner(), accounts().alice);
        }

        // ── record_deposit ────────────────────────────────────────────────────

        #[ink::test]
        fn deposit_rejects_unlisted_hook() {
            let mut record = deploy();
            let accs = accounts();
            set_caller(accs.charlie);
            let result = record.record_deposit(accs.eve, ONE);
            assert_eq!(result, Err(Error::CallerNotAllowed));
            assert_eq!(result.unwrap_err().reason(), "Caller not allowed");
        }

        #[ink::test]
        fn deposit_updates_both_totals() {
            let mut record = deploy();
            let accs = accounts();
            record.record_deposit(accs.eve, 10 * ONE).unwrap();
            record.record_deposit(accs.frank, 5 * ONE).unwrap();
            assert_eq!(record.get_net_deposit(accs.eve), 10 * ONE);
            assert_eq!(record.get_net_deposit(accs.frank), 5 * ONE);
            assert_eq!(record.get_global_deposit_amount(), 15 * ONE);
        }

        #[ink::test]
        fn deposit_up_to_account_cap_is_accepted() {
            let mut record = deploy();
            let eve = accounts().eve;
            record.record_deposit(eve, ACCOUNT_CAP).unwrap();
            assert_eq!(record.get_net_deposit(eve), ACCOUNT_CAP);
        }

        #[ink::test]
        fn deposit_above_account_cap_is_rejected() {
            let mut record = deploy();
            let eve = accounts().eve;
            record.record_deposit(eve, ACCOUNT_CAP).unwrap();
            let result = record.record_deposit(eve, 1);
            assert_eq!(result, Err(Error::AccountDepositCapExceeded));
            assert_eq!(record.get_net_deposit(eve), ACCOUNT_CAP);
            assert_eq!(record.get_global_deposit_amount(), ACCOUNT_CAP);
        }

        #[ink::test]
        fn deposit_above_global_cap_is_rejected_first() {
            let accs = accounts();
            set_caller(accs.alice);
            let mut record = CollateralDepositRecord::new(100, 1_000);
            record.set_allowed_hook(accs.bob, true).unwrap();
            set_caller(accs.bob);

            // Breaks both ceilings; the global check wins.
            assert_eq!(
                record.record_deposit(accs.eve, 1_001),
                Err(Error::GlobalDepositCapExceeded)
            );
            record.record_deposit(accs.eve, 100).unwrap();
            assert_eq!(
                record.record_deposit(accs.frank, 1),
                Err(Error::GlobalDepositCapExceeded)
            );
            assert_eq!(record.get_net_deposit(accs.frank), 0);
        }

        #[ink::test]
        fn deposit_overflowing_global_total_is_rejected() {
            let accs = accounts();
            set_caller(accs.alice);
            let mut record = CollateralDepositRecord::new(Balance::MAX, Balance::MAX);
            record.set_allowed_hook(accs.bob, true).unwrap();
            set_caller(accs.bob);

            record.record_deposit(accs.eve, Balance::MAX).unwrap();
            assert_eq!(record.record_deposit(accs.frank, 1), Err(Error::Overflow));

            assert_eq!(record.get_global_deposit_amount(), Balance::MAX);
            assert_eq!(record.get_net_deposit(accs.eve), Balance::MAX);
            assert_eq!(record.get_net_deposit(accs.frank), 0);
        }

        // ── record_withdrawal ─────────────────────────────────────────────────

        #[ink::test]
        fn withdrawal_reduces_totals() {
            let mut record = deploy();
            let eve = accounts().eve;
            record.record_deposit(eve, 10 * ONE).unwrap();
            record.record_withdrawal(eve, 4 * ONE).unwrap();
            assert_eq!(record.get_net_deposit(eve), 6 * ONE);
            assert_eq!(record.get_global_deposit_amount(), 6 * ONE);
        }

        #[ink::test]
        fn withdrawal_floors_at_zero() {
            let mut record = deploy();
            let accs = accounts();
            record.record_deposit(accs.eve, 10).unwrap();
            record.record_deposit(accs.frank, 5).unwrap();
            record.record_withdrawal(accs.frank, 50).unwrap();
            assert_eq!(record.get_net_deposit(accs.frank), 0);
            assert_eq!(record.get_global_deposit_amount(), 0);
            assert_eq!(record.get_net_deposit(accs.eve), 10);
        }

        #[ink::test]
        fn withdrawal_frees_account_headroom() {
            let mut record = deploy();
            let eve = accounts().eve;
            record.record_deposit(eve, ACCOUNT_CAP).unwrap();
            record.record_withdrawal(eve, ONE).unwrap();
            record.record_deposit(eve, ONE).unwrap();
            assert_eq!(record.get_net_deposit(eve), ACCOUNT_CAP);
        }

        #[ink::test]
        fn withdrawal_rejects_unlisted_hook() {
            let mut record = deploy();
            set_caller(accounts().alice);
            assert_eq!(record.record_withdrawal(accounts().eve, 1), Err(Error::CallerNotAllowed));
        }

        // ── Admin ─────────────────────────────────────────────────────────────

        #[ink::test]
        fn setters_reject_non_owner() {
            let mut record = deploy();
            let accs = accounts();
            set_caller(accs.charlie);
            assert_eq!(record.set_global_deposit_cap(1), Err(Error::NotOwner));
            assert_eq!(record.set_account_deposit_cap(1), Err(Error::NotOwner));
            assert_eq!(record.set_allowed_hook(accs.charlie, true), Err(Error::NotOwner));
            assert_eq!(record.get_global_deposit_cap(), GLOBAL_CAP);
            assert!(!record.is_hook_allowed(accs.charlie));
        }

        #[ink::test]
        fn owner_can_retune_caps() {
            let mut record = deploy();
            let accs = accounts();
            set_caller(accs.alice);
            record.set_account_deposit_cap(ACCOUNT_CAP * 2).unwrap();
            record.set_global_deposit_cap(GLOBAL_CAP / 2).unwrap();
            assert_eq!(record.get_account_deposit_cap(), ACCOUNT_CAP * 2);
            assert_eq!(record.get_global_deposit_cap(), GLOBAL_CAP / 2);

            set_caller(accs.bob);
            record.record_deposit(accs.eve, ACCOUNT_CAP * 2).unwrap();
        }

        #[ink::test]
        fn revoked_hook_is_rejected() {
            let mut record = deploy();
            let accs = accounts();
            set_caller(accs.alice);
            record.set_allowed_hook(accs.bob, false).unwrap();
            assert!(!record.is_hook_allowed(accs.bob));

            set_caller(accs.bob);
            assert_eq!(record.record_deposit(accs.eve, 1), Err(Error::CallerNotAllowed));
        }

        #[ink::test]
        fn transfer_ownership_rejects_zero() {
            let mut record = deploy();
            set_caller(accounts().alice);
            assert_eq!(
                record.transfer_ownership(AccountId::from(ZERO_ADDRESS)),
                Err(Error::NewOwnerIsZeroAddress)
            );
            record.transfer_ownership(accounts().django).unwrap();
            assert_eq!(record.owner(), accounts().django);
        }
    }
}
