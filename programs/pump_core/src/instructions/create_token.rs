//! Permissionless Token Launch
//!
//! Anyone passing the admission gate can launch a token:
//! 1. The creator picks a curve, a total supply and seed liquidity
//! 2. A mint is created with the pool PDA as mint authority
//! 3. The full supply is minted into the pool vault
//! 4. The seed SOL moves into the pool PDA as the initial SOL reserve

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    metadata::{
        create_metadata_accounts_v3, mpl_token_metadata::types::DataV2, CreateMetadataAccountsV3,
        Metadata,
    },
    token_interface::{mint_to, Mint, MintTo, TokenAccount, TokenInterface},
};

use crate::constants::{MAX_NAME_LEN, MAX_SYMBOL_LEN, MAX_URI_LEN, TOKEN_DECIMALS};
use crate::engine::{admit, CreationRequest};
use crate::errors::PumpError;
use crate::state::{CreatorProfile, CurveParams, PlatformConfig, Pool};

/// Launch parameters chosen by the creator
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CreateTokenParams {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub curve: CurveParams,
    /// Base units minted into the pool
    pub total_supply: u64,
    /// Lamports seeding the SOL reserve
    pub initial_sol_reserves: u64,
}

impl CreateTokenParams {
    fn validate_metadata(&self) -> Result<()> {
        require!(
            !self.name.is_empty() && self.name.len() <= MAX_NAME_LEN,
            PumpError::InvalidMetadata
        );
        require!(
            !self.symbol.is_empty() && self.symbol.len() <= MAX_SYMBOL_LEN,
            PumpError::InvalidMetadata
        );
        require!(self.uri.len() <= MAX_URI_LEN, PumpError::InvalidMetadata);
        Ok(())
    }
}

/// Event emitted when a token launches
#[event]
pub struct TokenCreated {
    pub mint: Pubkey,
    pub pool: Pubkey,
    pub creator: Pubkey,
    pub name: String,
    pub symbol: String,
    pub curve: CurveParams,
    pub total_supply: u64,
    pub initial_sol_reserves: u64,
    pub initial_price: u64,
    pub timestamp: i64,
}

/// Accounts for launching a token
#[derive(Accounts)]
pub struct CreateToken<'info> {
    /// Token creator (pays for every new account and the seed SOL)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Global platform configuration
    #[account(
        mut,
        seeds = [PlatformConfig::SEED],
        bump = platform_config.bump,
    )]
    pub platform_config: Account<'info, PlatformConfig>,

    /// Anti-abuse record for the creator (created on first launch)
    #[account(
        init_if_needed,
        payer = creator,
        space = 8 + CreatorProfile::INIT_SPACE,
        seeds = [CreatorProfile::SEED, creator.key().as_ref()],
        bump,
    )]
    pub creator_profile: Account<'info, CreatorProfile>,

    /// Mint of the launched token
    #[account(
        init,
        payer = creator,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = pool.key(),
        mint::token_program = token_program,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// Pool for the launched token
    #[account(
        init,
        payer = creator,
        space = 8 + Pool::INIT_SPACE,
        seeds = [Pool::SEED, mint.key().as_ref()],
        bump,
    )]
    pub pool: Account<'info, Pool>,

    /// Vault holding the pool's token reserve
    #[account(
        init,
        payer = creator,
        associated_token::mint = mint,
        associated_token::authority = pool,
        associated_token::token_program = token_program,
    )]
    pub pool_vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Validated by deriving the metadata PDA
    #[account(
        mut,
        seeds = [b"metadata", token_metadata_program.key().as_ref(), mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub metadata_account: UncheckedAccount<'info>,

    pub token_metadata_program: Program<'info, Metadata>,
    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> CreateToken<'info> {
    pub fn create_token(
        &mut self,
        params: CreateTokenParams,
        bumps: &CreateTokenBumps,
    ) -> Result<()> {
        params.validate_metadata()?;
        let now = Clock::get()?.unix_timestamp;

        self.creator_profile
            .ensure_initialized(self.creator.key(), bumps.creator_profile);

        let request = CreationRequest {
            curve: params.curve,
            total_supply: params.total_supply,
            initial_sol_reserves: params.initial_sol_reserves,
        };
        let init = admit(&mut self.creator_profile, &self.platform_config, &request, now)?;

        self.pool.set_inner(Pool {
            mint: self.mint.key(),
            creator: self.creator.key(),
            sol_reserves: init.sol_reserves,
            token_reserves: init.token_reserves,
            total_supply: init.total_supply,
            curve: init.curve,
            current_price: init.initial_price,
            current_market_cap: 0,
            trading_locked: false,
            graduated: false,
            total_volume_sol: 0,
            trade_count: 0,
            created_at: now,
            last_trade_at: 0,
            bump: bumps.pool,
        });

        // Seed SOL reserve
        system_program::transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.creator.to_account_info(),
                    to: self.pool.to_account_info(),
                },
            ),
            init.sol_reserves,
        )?;

        let mint_key = self.mint.key();
        let pool_seeds = &[Pool::SEED, mint_key.as_ref(), &[bumps.pool]];
        let signer_seeds = &[&pool_seeds[..]];

        create_metadata_accounts_v3(
            CpiContext::new_with_signer(
                self.token_metadata_program.to_account_info(),
                CreateMetadataAccountsV3 {
                    metadata: self.metadata_account.to_account_info(),
                    mint: self.mint.to_account_info(),
                    mint_authority: self.pool.to_account_info(),
                    update_authority: self.pool.to_account_info(),
                    payer: self.creator.to_account_info(),
                    system_program: self.system_program.to_account_info(),
                    rent: self.rent.to_account_info(),
                },
                signer_seeds,
            ),
            DataV2 {
                name: params.name.clone(),
                symbol: params.symbol.clone(),
                uri: params.uri,
                seller_fee_basis_points: 0,
                creators: None,
                collection: None,
                uses: None,
            },
            false, // Is mutable
            true,  // Update authority is signer
            None,  // Collection details
        )?;

        // Full supply goes to the curve
        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.mint.to_account_info(),
                    to: self.pool_vault.to_account_info(),
                    authority: self.pool.to_account_info(),
                },
                signer_seeds,
            ),
            init.total_supply,
        )?;

        self.platform_config.total_tokens_created =
            self.platform_config.total_tokens_created.saturating_add(1);

        msg!("Token launched: {}", params.symbol);
        msg!("Mint: {}", mint_key);
        msg!("Curve: {}", init.curve.name());
        msg!("Initial price: {}", init.initial_price);

        emit!(TokenCreated {
            mint: mint_key,
            pool: self.pool.key(),
            creator: self.creator.key(),
            name: params.name,
            symbol: params.symbol,
            curve: init.curve,
            total_supply: init.total_supply,
            initial_sol_reserves: init.sol_reserves,
            initial_price: init.initial_price,
            timestamp: now,
        });

        Ok(())
    }
}
