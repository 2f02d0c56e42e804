//! Token Trading
//!
//! Buys and sells against a pool's bonding curve. The pool lock is held
//! while tokens move, so a reentrant call into the same pool fails with
//! `TradeInProgress`.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::engine::{TradeLock, TradeReceipt};
use crate::errors::PumpError;
use crate::state::{PlatformConfig, Pool, TraderProfile};

/// Event emitted when tokens are bought
#[event]
pub struct TokensBought {
    pub mint: Pubkey,
    pub buyer: Pubkey,
    pub sol_in: u64,
    pub tokens_out: u64,
    pub platform_fee: u64,
    pub whale_tax: u64,
    pub new_price: u64,
    pub new_market_cap: u64,
    pub sol_reserves: u64,
    pub token_reserves: u64,
    pub timestamp: i64,
}

/// Event emitted when tokens are sold
#[event]
pub struct TokensSold {
    pub mint: Pubkey,
    pub seller: Pubkey,
    pub tokens_in: u64,
    pub sol_out: u64,
    pub platform_fee: u64,
    pub whale_tax: u64,
    pub new_price: u64,
    pub new_market_cap: u64,
    pub sol_reserves: u64,
    pub token_reserves: u64,
    pub timestamp: i64,
}

/// Accounts for trading operations
#[derive(Accounts)]
pub struct Trade<'info> {
    /// Trader
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Platform configuration (counters are updated)
    #[account(
        mut,
        seeds = [PlatformConfig::SEED],
        bump = platform_config.bump,
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    /// Pool being traded against
    #[account(
        mut,
        seeds = [Pool::SEED, mint.key().as_ref()],
        bump = pool.bump,
        has_one = mint,
    )]
    pub pool: Account<'info, Pool>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// Pool's token reserve
    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = pool,
        associated_token::token_program = token_program,
    )]
    pub pool_vault: InterfaceAccount<'info, TokenAccount>,

    /// Trader's token account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = mint,
        associated_token::authority = trader,
        associated_token::token_program = token_program,
    )]
    pub trader_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Trader's cooldown and volume record
    #[account(
        init_if_needed,
        payer = trader,
        space = 8 + TraderProfile::INIT_SPACE,
        seeds = [TraderProfile::SEED, trader.key().as_ref()],
        bump,
    )]
    pub trader_profile: Account<'info, TraderProfile>,

    /// Receives platform fees and whale tax
    #[account(
        mut,
        address = platform_config.treasury @ PumpError::Unauthorized,
    )]
    pub treasury: SystemAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    /// Buy tokens with SOL
    pub fn buy(
        &mut self,
        sol_in: u64,
        min_tokens_out: u64,
        bumps: &TradeBumps,
    ) -> Result<TradeReceipt> {
        let now = Clock::get()?.unix_timestamp;
        let holder_balance = self.trader_token_account.amount;
        self.trader_profile
            .ensure_initialized(self.trader.key(), bumps.trader_profile);

        let pool_info = self.pool.to_account_info();
        let mint_key = self.mint.key();
        let pool_seeds = &[Pool::SEED, mint_key.as_ref(), &[self.pool.bump]];
        let signer_seeds = &[&pool_seeds[..]];

        let mut lock = TradeLock::acquire(&mut self.pool)?;
        let receipt = lock.buy(
            &self.platform_config,
            &mut self.trader_profile,
            holder_balance,
            sol_in,
            min_tokens_out,
            now,
        )?;

        // Curve share of the SOL goes to the pool
        system_program::transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.trader.to_account_info(),
                    to: pool_info.clone(),
                },
            ),
            receipt.reserve_delta,
        )?;

        let treasury_amount = receipt.treasury_amount();
        if treasury_amount > 0 {
            system_program::transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.trader.to_account_info(),
                        to: self.treasury.to_account_info(),
                    },
                ),
                treasury_amount,
            )?;
        }

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.pool_vault.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.trader_token_account.to_account_info(),
                    authority: pool_info,
                },
                signer_seeds,
            ),
            receipt.amount_out,
            self.mint.decimals,
        )?;
        drop(lock);

        self.platform_config
            .record_trade(receipt.sol_volume, receipt.treasury_amount());

        msg!("Bought {} tokens for {} lamports", receipt.amount_out, sol_in);
        msg!("New price: {}", receipt.new_price);

        emit!(TokensBought {
            mint: mint_key,
            buyer: self.trader.key(),
            sol_in,
            tokens_out: receipt.amount_out,
            platform_fee: receipt.platform_fee,
            whale_tax: receipt.whale_tax,
            new_price: receipt.new_price,
            new_market_cap: receipt.new_market_cap,
            sol_reserves: self.pool.sol_reserves,
            token_reserves: self.pool.token_reserves,
            timestamp: now,
        });

        Ok(receipt)
    }

    /// Sell tokens back to the pool
    pub fn sell(
        &mut self,
        tokens_in: u64,
        min_sol_out: u64,
        bumps: &TradeBumps,
    ) -> Result<TradeReceipt> {
        let now = Clock::get()?.unix_timestamp;
        let holder_balance = self.trader_token_account.amount;
        self.trader_profile
            .ensure_initialized(self.trader.key(), bumps.trader_profile);

        let mut lock = TradeLock::acquire(&mut self.pool)?;
        let receipt = lock.sell(
            &self.platform_config,
            &mut self.trader_profile,
            holder_balance,
            tokens_in,
            min_sol_out,
            now,
        )?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_token_account.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: self.pool_vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            tokens_in,
            self.mint.decimals,
        )?;
        drop(lock);

        // The pool is program-owned, so SOL leaves it by direct lamport moves
        self.pool.sub_lamports(receipt.reserve_delta)?;
        let treasury_amount = receipt.treasury_amount();
        if treasury_amount > 0 {
            self.treasury.add_lamports(treasury_amount)?;
        }
        self.trader.add_lamports(receipt.amount_out)?;

        self.platform_config
            .record_trade(receipt.sol_volume, receipt.treasury_amount());

        msg!("Sold {} tokens for {} lamports", tokens_in, receipt.amount_out);
        msg!("New price: {}", receipt.new_price);

        emit!(TokensSold {
            mint: self.mint.key(),
            seller: self.trader.key(),
            tokens_in,
            sol_out: receipt.amount_out,
            platform_fee: receipt.platform_fee,
            whale_tax: receipt.whale_tax,
            new_price: receipt.new_price,
            new_market_cap: receipt.new_market_cap,
            sol_reserves: self.pool.sol_reserves,
            token_reserves: self.pool.token_reserves,
            timestamp: now,
        });

        Ok(receipt)
    }
}
