#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// # Account Access Controller
///
/// **Role:** Gatekeeper for which accounts may interact with the collateral
/// contracts.  Accounts get on the allow list either directly from the owner
/// or by proving membership in the owner's Merkle tree with `allow_self`.
/// The block list always wins over the allow list.
///
/// Both lists are versioned by a 16-bit index.  Clearing a list bumps its
/// index, which orphans every entry written under the previous one:
///
/// ```text
///   allowed_accounts[(allowed_accounts_index, account)]
///   blocked_accounts[(blocked_accounts_index, account)]
/// ```
#[ink::contract]
mod account_access_controller {
    use ink::env::hash::Keccak256;
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;

    pub const ZERO_ADDRESS: [u8; 32] = [0u8; 32];

    pub type Hash32 = [u8; 32];

    // =========================================================================
    // MERKLE PROOFS
    // =========================================================================

    /// Leaf committed to by the tree for `account`: keccak256 of its SCALE
    /// encoding (the raw 32 account bytes).
    pub fn leaf_hash(account: &AccountId) -> Hash32 {
        let mut out = [0u8; 32];
        ink::env::hash_encoded::<Keccak256, _>(account, &mut out);
        out
    }

    /// Parent of two nodes.  Children are sorted before hashing so proofs
    /// carry no left/right flags.
    pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(left);
        buf[32..].copy_from_slice(right);
        let mut out = [0u8; 32];
        ink::env::hash_bytes::<Keccak256>(&buf, &mut out);
        out
    }

    pub fn verify_proof(proof: &[Hash32], root: &Hash32, leaf: Hash32) -> bool {
        let computed = proof.iter().fold(leaf, |node, sibling| hash_pair(&node, sibling));
        &computed == root
    }

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct AccountAccessController {
        owner: AccountId,

        /// Merkle root of the accounts eligible for `allow_self`.
        root: Hash32,

        allowed_accounts_index: u16,
        blocked_accounts_index: u16,

        allowed_accounts: Mapping<(u16, AccountId), bool>,
        blocked_accounts: Mapping<(u16, AccountId), bool>,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct RootChanged {
        root: Hash32,
    }

    #[ink(event)]
    pub struct AccountAllowed {
        #[ink(topic)]
        account: AccountId,
    }

    #[ink(event)]
    pub struct AccountBlocked {
        #[ink(topic)]
        account: AccountId,
    }

    #[ink(event)]
    pub struct AllowedAccountsCleared {
        index: u16,
    }

    #[ink(event)]
    pub struct BlockedAccountsCleared {
        index: u16,
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
        /// Caller is on the current block list.
        AccountBlocked,
        /// Caller is already on the current allow list.
        AccountAlreadyRegistered,
        /// Proof does not lead to the stored root.
        InvalidProof,
        /// Ownership cannot be handed to the zero account.
        NewOwnerIsZeroAddress,
        /// A list has been cleared `u16::MAX` times and cannot be cleared again.
        IndexOverflow,
    }

    impl Error {
        pub fn reason(&self) -> &'static str {
            match self {
                Error::NotOwner => "Ownable: caller is not the owner",
                Error::AccountBlocked => "Account blocked",
                Error::AccountAlreadyRegistered => "Account already registered",
                Error::InvalidProof => "Invalid proof",
                Error::NewOwnerIsZeroAddress => "Ownable: new owner is the zero address",
                Error::IndexOverflow => "Index overflow",
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

    impl AccountAccessController {
        #[ink(constructor)]
        pub fn new() -> Self {
            Self {
                owner: Self::env().caller(),
                root: [0u8; 32],
                allowed_accounts_index: 0,
                blocked_accounts_index: 0,
                allowed_accounts: Mapping::default(),
                blocked_accounts: Mapping::default(),
            }
        }

        // =====================================================================
        // SELF-REGISTRATION
        // =====================================================================

        /// Add the caller to the allow list by proving its leaf is part of
        /// the tree under `root`.
        #[ink(message)]
        pub fn allow_self(&mut self, proof: Vec<Hash32>) -> Result<(), Error> {
            let caller = self.env().caller();
            if self.is_account_blocked(caller) {
                return Err(Error::AccountBlocked);
            }
            if self.is_account_allowed(caller) {
                return Err(Error::AccountAlreadyRegistered);
            }
            if !verify_proof(&proof, &self.root, leaf_hash(&caller)) {
                return Err(Error::InvalidProof);
            }
            self.allow(caller);
            Ok(())
        }

        // =====================================================================
        // ADMIN
        // =====================================================================

        #[ink(message)]
        pub fn set_root(&mut self, root: Hash32) -> Result<(), Error> {
            self.only_owner()?;
            self.root = root;
            self.env().emit_event(RootChanged { root });
            Ok(())
        }

        #[ink(message)]
        pub fn allow_accounts(&mut self, accounts: Vec<AccountId>) -> Result<(), Error> {
            self.only_owner()?;
            for account in accounts {
                self.allow(account);
            }
            Ok(())
        }

        #[ink(message)]
        pub fn block_accounts(&mut self, accounts: Vec<AccountId>) -> Result<(), Error> {
            self.only_owner()?;
            let index = self.blocked_accounts_index;
            for account in accounts {
                self.blocked_accounts.insert((index, account), &true);
                self.env().emit_event(AccountBlocked { account });
            }
            Ok(())
        }

        #[ink(message)]
        pub fn clear_allowed_accounts(&mut self) -> Result<(), Error> {
            self.only_owner()?;
            // A wrapped index would bring index-0 entries back.
            self.allowed_accounts_index =
                self.allowed_accounts_index.checked_add(1).ok_or(Error::IndexOverflow)?;
            self.env().emit_event(AllowedAccountsCleared {
                index: self.allowed_accounts_index,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn clear_blocked_accounts(&mut self) -> Result<(), Error> {
            self.only_owner()?;
            self.blocked_accounts_index =
                self.blocked_accounts_index.checked_add(1).ok_or(Error::IndexOverflow)?;
            self.env().emit_event(BlockedAccountsCleared {
                index: self.blocked_accounts_index,
            });
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
        // VIEW FUNCTIONS
        // =====================================================================

        #[ink(message)]
        pub fn get_root(&self) -> Hash32 {
            self.root
        }

        #[ink(message)]
        pub fn is_account_allowed(&self, account: AccountId) -> bool {
            self.allowed_accounts
                .get((self.allowed_accounts_index, account))
                .unwrap_or(false)
        }

        #[ink(message)]
        pub fn is_account_blocked(&self, account: AccountId) -> bool {
            self.blocked_accounts
                .get((self.blocked_accounts_index, account))
                .unwrap_or(false)
        }

        #[ink(message)]
        pub fn get_allowed_accounts_index(&self) -> u16 {
            self.allowed_accounts_index
        }

        #[ink(message)]
        pub fn get_blocked_accounts_index(&self) -> u16 {
            self.blocked_accounts_index
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        // =====================================================================
        // INTERNAL HELPERS
        // =====================================================================

        fn allow(&mut self, account: AccountId) {
            self.allowed_accounts
                .insert((self.allowed_accounts_index, account), &true);
            self.env().emit_event(AccountAllowed { account });
        }

        fn only_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::NotOwner);
            }
            Ok(())
        }
    }

    impl Default for AccountAccessController {
        fn default() -> Self {
            Self::new()
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
