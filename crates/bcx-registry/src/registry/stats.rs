use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use super::domain::{
    AdminStats, BuyerPortfolio, CarbonProject, Holding, MonthlyVolume, ProjectId, ProjectStatus,
    Transaction, TransactionStatus, TransactionType,
};

fn counted(transaction: &Transaction) -> bool {
    transaction.status != TransactionStatus::Failed
}

pub(crate) fn admin_stats(projects: &[CarbonProject], transactions: &[Transaction]) -> AdminStats {
    let mut issued = 0u64;
    let mut traded = 0u64;
    let mut retired = 0u64;
    let mut buyers = BTreeSet::new();
    let mut months: BTreeMap<String, MonthlyVolume> = BTreeMap::new();

    for transaction in transactions.iter().filter(|tx| counted(tx)) {
        match transaction.kind {
            TransactionType::Issuance => issued = issued.saturating_add(transaction.quantity),
            TransactionType::Retirement => retired = retired.saturating_add(transaction.quantity),
            TransactionType::Transfer => traded = traded.saturating_add(transaction.quantity),
            TransactionType::Purchase => {
                traded = traded.saturating_add(transaction.quantity);
                buyers.insert(transaction.to.as_str());

                let month = transaction.timestamp.format("%Y-%m").to_string();
                let entry = months.entry(month.clone()).or_insert(MonthlyVolume {
                    month,
                    volume: 0,
                    value: 0,
                });
                entry.volume = entry.volume.saturating_add(transaction.quantity);
                entry.value = entry
                    .value
                    .saturating_add(transaction.total_value.unwrap_or(0));
            }
        }
    }

    let developers: BTreeSet<&str> = projects
        .iter()
        .map(|project| project.developer_id.as_str())
        .filter(|id| !id.is_empty())
        .collect();

    AdminStats {
        total_credits_issued: issued,
        total_credits_traded: traded,
        total_credits_retired: retired,
        pending_approvals: projects
            .iter()
            .filter(|project| project.status == ProjectStatus::Pending)
            .count(),
        active_projects: projects
            .iter()
            .filter(|project| project.status == ProjectStatus::Active)
            .count(),
        registered_developers: developers.len(),
        registered_buyers: buyers.len(),
        monthly_volume: months.into_values().collect(),
    }
}

#[derive(Debug, Default)]
struct Tally {
    project_name: String,
    acquired: u64,
    bought: u64,
    spent: u64,
    retired: u64,
    transferred_out: u64,
    last_purchase: Option<DateTime<Utc>>,
}

impl Tally {
    fn held(&self) -> u64 {
        self.acquired
            .saturating_sub(self.retired)
            .saturating_sub(self.transferred_out)
    }
}

fn tally(buyer_id: &str, transactions: &[Transaction]) -> BTreeMap<ProjectId, Tally> {
    let mut tallies: BTreeMap<ProjectId, Tally> = BTreeMap::new();

    for transaction in transactions.iter().filter(|tx| counted(tx)) {
        let inbound = transaction.to == buyer_id;
        let outbound = transaction.from == buyer_id;
        if !inbound && !outbound {
            continue;
        }

        let entry = tallies
            .entry(transaction.project_id.clone())
            .or_insert_with(|| Tally {
                project_name: transaction.project_name.clone(),
                ..Tally::default()
            });

        match transaction.kind {
            TransactionType::Purchase if inbound => {
                entry.acquired = entry.acquired.saturating_add(transaction.quantity);
                entry.bought = entry.bought.saturating_add(transaction.quantity);
                entry.spent = entry
                    .spent
                    .saturating_add(transaction.total_value.unwrap_or(0));
                entry.last_purchase = entry.last_purchase.max(Some(transaction.timestamp));
            }
            TransactionType::Transfer if inbound => {
                entry.acquired = entry.acquired.saturating_add(transaction.quantity);
            }
            TransactionType::Transfer => {
                entry.transferred_out = entry.transferred_out.saturating_add(transaction.quantity);
            }
            TransactionType::Retirement if outbound => {
                entry.retired = entry.retired.saturating_add(transaction.quantity);
            }
            _ => {}
        }
    }

    tallies
}

/// Credits `buyer_id` still holds in `project_id`: acquired minus retired and transferred out.
pub(crate) fn net_holding(buyer_id: &str, project_id: &ProjectId, transactions: &[Transaction]) -> u64 {
    tally(buyer_id, transactions)
        .get(project_id)
        .map(Tally::held)
        .unwrap_or(0)
}

pub(crate) fn buyer_portfolio(
    buyer_id: &str,
    projects: &[CarbonProject],
    transactions: &[Transaction],
) -> BuyerPortfolio {
    let catalog: HashMap<&ProjectId, &CarbonProject> =
        projects.iter().map(|project| (&project.id, project)).collect();

    let mut portfolio = BuyerPortfolio {
        total_credits_owned: 0,
        total_credits_retired: 0,
        total_spent: 0,
        carbon_offset: 0,
        holdings: Vec::new(),
    };

    for (project_id, tally) in tally(buyer_id, transactions) {
        let held = tally.held();
        portfolio.total_credits_owned = portfolio.total_credits_owned.saturating_add(held);
        portfolio.total_credits_retired =
            portfolio.total_credits_retired.saturating_add(tally.retired);
        portfolio.total_spent = portfolio.total_spent.saturating_add(tally.spent);

        if held == 0 {
            continue;
        }
        let Some(project) = catalog.get(&project_id) else {
            continue;
        };

        // Half-up integer average.
        let avg_price = if tally.bought == 0 {
            0
        } else {
            tally.spent.saturating_add(tally.bought / 2) / tally.bought
        };

        portfolio.holdings.push(Holding {
            project_id,
            project_name: tally.project_name,
            sector: project.sector.clone(),
            quantity: held,
            avg_price,
            current_price: project.price_per_credit,
            purchased_at: tally.last_purchase,
        });
    }

    portfolio.carbon_offset = portfolio
        .total_credits_owned
        .saturating_add(portfolio.total_credits_retired);
    portfolio
}
