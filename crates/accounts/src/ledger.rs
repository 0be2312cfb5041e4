//! Balance-mutation rules.
//!
//! These functions are the single source of truth for how balances may
//! change. Store implementations call them inside their transaction, so a
//! mutation that fails validation never reaches the write path.

use coffer_core::{DomainError, DomainResult};

/// Apply a deposit to a balance, returning the new balance.
pub fn deposit(balance: i64, amount: i64) -> DomainResult<i64> {
    if amount <= 0 {
        return Err(DomainError::InvalidAmount);
    }
    balance
        .checked_add(amount)
        .ok_or_else(|| DomainError::validation("balance overflow"))
}

/// Apply a transfer between two balances, returning `(sender, receiver)`.
///
/// Both new balances are produced together; callers must persist both or
/// neither.
pub fn transfer(
    sender_balance: i64,
    receiver_balance: i64,
    amount: i64,
) -> DomainResult<(i64, i64)> {
    if amount <= 0 {
        return Err(DomainError::InvalidAmount);
    }
    if sender_balance < amount {
        return Err(DomainError::InsufficientFunds);
    }

    let debited = sender_balance - amount;
    let credited = receiver_balance
        .checked_add(amount)
        .ok_or_else(|| DomainError::validation("balance overflow"))?;

    Ok((debited, credited))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn deposit_increases_balance_by_exactly_amount() {
        assert_eq!(deposit(0, 100), Ok(100));
        assert_eq!(deposit(250, 7), Ok(257));
    }

    #[test]
    fn non_positive_deposit_rejected() {
        assert_eq!(deposit(100, 0), Err(DomainError::InvalidAmount));
        assert_eq!(deposit(100, -5), Err(DomainError::InvalidAmount));
    }

    #[test]
    fn deposit_overflow_rejected() {
        let err = deposit(i64::MAX, 1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn transfer_moves_exact_amount() {
        assert_eq!(transfer(100, 0, 40), Ok((60, 40)));
    }

    #[test]
    fn transfer_of_entire_balance_succeeds() {
        assert_eq!(transfer(100, 0, 100), Ok((0, 100)));
    }

    #[test]
    fn transfer_exceeding_balance_rejected() {
        assert_eq!(transfer(99, 0, 100), Err(DomainError::InsufficientFunds));
    }

    #[test]
    fn non_positive_transfer_rejected() {
        assert_eq!(transfer(100, 0, 0), Err(DomainError::InvalidAmount));
        assert_eq!(transfer(100, 0, -1), Err(DomainError::InvalidAmount));
    }

    #[test]
    fn transfer_overflowing_receiver_rejected() {
        let err = transfer(10, i64::MAX, 1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: over any sequence of transfer attempts between two
        /// accounts, the total is conserved and no balance goes negative.
        #[test]
        fn transfers_conserve_total_and_never_overdraw(
            start_a in 0i64..1_000_000,
            start_b in 0i64..1_000_000,
            amounts in prop::collection::vec((-100i64..1_000_000, any::<bool>()), 1..50)
        ) {
            let total = start_a + start_b;
            let (mut a, mut b) = (start_a, start_b);

            for (amount, a_sends) in amounts {
                let result = if a_sends {
                    transfer(a, b, amount)
                } else {
                    transfer(b, a, amount)
                };

                // Failed attempts must leave both balances untouched.
                if let Ok((sender, receiver)) = result {
                    if a_sends {
                        a = sender;
                        b = receiver;
                    } else {
                        b = sender;
                        a = receiver;
                    }
                }

                prop_assert!(a >= 0);
                prop_assert!(b >= 0);
                prop_assert_eq!(a + b, total);
            }
        }

        /// Property: a successful deposit increases the balance by exactly
        /// the deposited amount.
        #[test]
        fn deposits_add_exactly(balance in 0i64..1_000_000, amount in 1i64..1_000_000) {
            prop_assert_eq!(deposit(balance, amount), Ok(balance + amount));
        }
    }
}
