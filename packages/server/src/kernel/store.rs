//! Postgres implementation of the entity store.
//!
//! Conditioned writes use `UPDATE ... WHERE <expected> RETURNING *` with
//! `fetch_optional`: a `None` row means the condition failed and nothing was
//! written. Paired workflow/pet updates run inside one transaction and roll
//! back whole when either condition fails.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{AdoptionId, CustodyId, EscrowId, PetId, UserId};
use crate::domains::adoptions::models::{Adoption, AdoptionStatus};
use crate::domains::custody::models::{Custody, CustodyStatus};
use crate::domains::escrow::models::{Escrow, EscrowStatus};
use crate::domains::pets::models::{Pet, PetDetails, PetStatus};
use crate::domains::users::models::User;

use super::traits::{BaseShelterStore, PetStatusChange};

pub struct PgShelterStore {
    pool: PgPool,
}

impl PgShelterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Conditioned pet write inside an open transaction.
    async fn cas_pet_status(
        tx: &mut Transaction<'_, Postgres>,
        change: PetStatusChange,
    ) -> Result<Option<Pet>> {
        sqlx::query_as::<_, Pet>(
            "UPDATE pets SET status = $3, updated_at = now()
             WHERE id = $1 AND status = $2
             RETURNING *",
        )
        .bind(change.pet_id)
        .bind(change.expected)
        .bind(change.next)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Into::into)
    }
}

#[async_trait]
impl BaseShelterStore for PgShelterStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn insert_user(&self, user: &User) -> Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, display_name, role, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.display_name)
        .bind(user.role)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn find_pet(&self, id: PetId) -> Result<Option<Pet>> {
        sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn insert_pet(&self, pet: &Pet) -> Result<Pet> {
        sqlx::query_as::<_, Pet>(
            "INSERT INTO pets (id, name, species, description, status, current_owner_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(pet.id)
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(&pet.description)
        .bind(pet.status)
        .bind(pet.current_owner_id)
        .bind(pet.created_at)
        .bind(pet.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn update_pet_details(&self, id: PetId, details: &PetDetails) -> Result<Option<Pet>> {
        sqlx::query_as::<_, Pet>(
            "UPDATE pets SET
                name = COALESCE($2, name),
                species = COALESCE($3, species),
                description = COALESCE($4, description),
                updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&details.name)
        .bind(&details.species)
        .bind(&details.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn update_pet_status(
        &self,
        id: PetId,
        expected: PetStatus,
        next: PetStatus,
    ) -> Result<Option<Pet>> {
        sqlx::query_as::<_, Pet>(
            "UPDATE pets SET status = $3, updated_at = now()
             WHERE id = $1 AND status = $2
             RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn find_adoption(&self, id: AdoptionId) -> Result<Option<Adoption>> {
        sqlx::query_as::<_, Adoption>("SELECT * FROM adoptions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn insert_adoption(&self, adoption: &Adoption) -> Result<Adoption> {
        sqlx::query_as::<_, Adoption>(
            "INSERT INTO adoptions (id, pet_id, adopter_id, owner_id, escrow_id, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(adoption.id)
        .bind(adoption.pet_id)
        .bind(adoption.adopter_id)
        .bind(adoption.owner_id)
        .bind(adoption.escrow_id)
        .bind(adoption.status)
        .bind(adoption.created_at)
        .bind(adoption.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn update_adoption_with_pet(
        &self,
        id: AdoptionId,
        expected: AdoptionStatus,
        next: AdoptionStatus,
        pet_change: Option<PetStatusChange>,
    ) -> Result<Option<(Adoption, Option<Pet>)>> {
        let mut tx = self.pool.begin().await?;

        let adoption = sqlx::query_as::<_, Adoption>(
            "UPDATE adoptions SET status = $3, updated_at = now()
             WHERE id = $1 AND status = $2
             RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(adoption) = adoption else {
            tx.rollback().await?;
            return Ok(None);
        };

        let pet = match pet_change {
            Some(change) => match Self::cas_pet_status(&mut tx, change).await? {
                Some(pet) => Some(pet),
                None => {
                    tx.rollback().await?;
                    return Ok(None);
                }
            },
            None => None,
        };

        tx.commit().await?;
        Ok(Some((adoption, pet)))
    }

    async fn find_custody(&self, id: CustodyId) -> Result<Option<Custody>> {
        sqlx::query_as::<_, Custody>("SELECT * FROM custody_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn insert_custody_with_pet(
        &self,
        custody: &Custody,
        pet_change: PetStatusChange,
    ) -> Result<Option<(Custody, Pet)>> {
        let mut tx = self.pool.begin().await?;

        let Some(pet) = Self::cas_pet_status(&mut tx, pet_change).await? else {
            tx.rollback().await?;
            return Ok(None);
        };

        let custody = sqlx::query_as::<_, Custody>(
            "INSERT INTO custody_records (id, pet_id, holder_id, escrow_id, status, started_at, ended_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(custody.id)
        .bind(custody.pet_id)
        .bind(custody.holder_id)
        .bind(custody.escrow_id)
        .bind(custody.status)
        .bind(custody.started_at)
        .bind(custody.ended_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some((custody, pet)))
    }

    async fn update_custody_with_pet(
        &self,
        id: CustodyId,
        expected: CustodyStatus,
        next: CustodyStatus,
        pet_change: Option<PetStatusChange>,
    ) -> Result<Option<(Custody, Option<Pet>)>> {
        let mut tx = self.pool.begin().await?;

        let custody = sqlx::query_as::<_, Custody>(
            "UPDATE custody_records SET
                status = $3,
                ended_at = CASE WHEN $3 = 'completed'::custody_status THEN now() ELSE ended_at END
             WHERE id = $1 AND status = $2
             RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(custody) = custody else {
            tx.rollback().await?;
            return Ok(None);
        };

        let pet = match pet_change {
            Some(change) => match Self::cas_pet_status(&mut tx, change).await? {
                Some(pet) => Some(pet),
                None => {
                    tx.rollback().await?;
                    return Ok(None);
                }
            },
            None => None,
        };

        tx.commit().await?;
        Ok(Some((custody, pet)))
    }

    async fn find_escrow(&self, id: EscrowId) -> Result<Option<Escrow>> {
        sqlx::query_as::<_, Escrow>("SELECT * FROM escrows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn insert_escrow(&self, escrow: &Escrow) -> Result<Escrow> {
        sqlx::query_as::<_, Escrow>(
            "INSERT INTO escrows (id, amount, status, payer_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(escrow.id)
        .bind(escrow.amount)
        .bind(escrow.status)
        .bind(escrow.payer_id)
        .bind(escrow.created_at)
        .bind(escrow.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn update_escrow_status(
        &self,
        id: EscrowId,
        expected: EscrowStatus,
        next: EscrowStatus,
    ) -> Result<Option<Escrow>> {
        sqlx::query_as::<_, Escrow>(
            "UPDATE escrows SET status = $3, updated_at = now()
             WHERE id = $1 AND status = $2
             RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }
}
