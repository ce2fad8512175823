use std::collections::HashSet;

use follower_graph::{BipartiteGraph, NodeKind};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::AccountCatalog;
use crate::config::Settings;
use crate::errors::PipelineError;
use crate::source::FollowerSource;

/// Builds the full follower graph of the small accounts, then re-seeds a
/// fresh graph containing only the intensely engaged users (degree above
/// `engagement_threshold` within the small-account graph) plus the small
/// accounts themselves. The interim graph can be very large and is dropped
/// as soon as the engaged set has been copied over.
pub fn build_core(
    catalog: &AccountCatalog,
    source: &dyn FollowerSource,
    engagement_threshold: usize,
) -> Result<BipartiteGraph, PipelineError> {
    let mut small_graph = BipartiteGraph::new();
    let total = catalog.small().count();
    for (i, rec) in catalog.small().enumerate() {
        let account = small_graph.add_node(&rec.name, NodeKind::Account)?;
        info!("{}/{}: {}", i + 1, total, rec.name);
        let followers = source.followers(&rec.name)?;
        debug!("\t {} followers", followers.len());
        for follower in &followers {
            let user = small_graph.add_node(follower, NodeKind::User)?;
            small_graph.add_edge(user, account)?;
        }
        debug!("\t {} overall nodes so far", small_graph.node_count());
    }

    let mut graph = BipartiteGraph::new();
    for rec in catalog.small() {
        graph.add_node(&rec.name, NodeKind::Account)?;
    }
    let mut carried = 0usize;
    for user in small_graph.nodes_of_kind(NodeKind::User) {
        if small_graph.degree(user)? <= engagement_threshold {
            continue;
        }
        let new_user = graph.add_node(small_graph.name(user)?, NodeKind::User)?;
        for &account in small_graph.neighbors(user)? {
            let new_account = graph.add_node(small_graph.name(account)?, NodeKind::Account)?;
            graph.add_edge(new_user, new_account)?;
        }
        carried += 1;
    }
    info!(
        "Carried {} intensely engaged users (of {} total) into the combined graph",
        carried,
        small_graph.count_of_kind(NodeKind::User)
    );
    Ok(graph)
}

/// Adds the big accounts. Followers the graph already knows are linked
/// directly; of the rest, exactly `sample_size` are drawn without
/// replacement and admitted as new user nodes. Their edges are deferred to
/// [`cross_link`], which sees the sampled set of all big accounts at once.
///
/// The unseen pool is sorted before drawing, so a pinned RNG seed reproduces
/// the exact sample.
pub fn extend_with_sampled<R: Rng>(
    mut graph: BipartiteGraph,
    catalog: &AccountCatalog,
    source: &dyn FollowerSource,
    sample_size: usize,
    allow_short_sample: bool,
    rng: &mut R,
) -> Result<(BipartiteGraph, HashSet<String>), PipelineError> {
    let mut sampled = HashSet::new();
    let total = catalog.big().count();
    for (i, rec) in catalog.big().enumerate() {
        let account = graph.add_node(&rec.name, NodeKind::Account)?;
        info!("{}/{}: {}", i + 1, total, rec.name);
        let followers = source.followers(&rec.name)?;
        debug!("\t {} followers", followers.len());

        let mut unseen = Vec::new();
        for follower in &followers {
            match graph.node_id(follower) {
                Some(user) => {
                    graph.add_edge(user, account)?;
                }
                None => unseen.push(follower.as_str()),
            }
        }

        unseen.sort_unstable();
        let take = if unseen.len() < sample_size {
            if !allow_short_sample {
                return Err(PipelineError::Sampling(format!(
                    "{}: unseen-follower pool has {} members, sample size is {}",
                    rec.name,
                    unseen.len(),
                    sample_size
                )));
            }
            warn!(
                "{}: unseen-follower pool has only {} members, taking all of them",
                rec.name,
                unseen.len()
            );
            unseen.len()
        } else {
            sample_size
        };
        for follower in unseen.choose_multiple(&mut *rng, take) {
            graph.add_node(follower, NodeKind::User)?;
            sampled.insert(follower.to_string());
        }
        debug!("\t number of nodes: {}", graph.node_count());
        debug!("\t number of edges: {}", graph.edge_count());
    }
    Ok((graph, sampled))
}

/// Second pass over the big-account follower lists. A sampled user is linked
/// only to the account that admitted it; any other big account whose
/// follower list contains that user still owes it an edge. Re-reading the
/// files here trades I/O for memory: no follower list is held across passes.
pub fn cross_link(
    mut graph: BipartiteGraph,
    catalog: &AccountCatalog,
    source: &dyn FollowerSource,
    sampled: &HashSet<String>,
) -> Result<BipartiteGraph, PipelineError> {
    let total = catalog.big().count();
    for (i, rec) in catalog.big().enumerate() {
        info!("{}/{}: {}", i + 1, total, rec.name);
        let account = graph.node_id(&rec.name).ok_or_else(|| {
            PipelineError::Data(format!("big account {} missing from graph", rec.name))
        })?;
        let followers = source.followers(&rec.name)?;
        for follower in followers.iter().filter(|f| sampled.contains(*f)) {
            let user = graph.node_id(follower).ok_or_else(|| {
                PipelineError::Data(format!("sampled user {} missing from graph", follower))
            })?;
            graph.add_edge(user, account)?;
        }
        debug!("\t number of edges: {}", graph.edge_count());
    }
    Ok(graph)
}

/// Adds a further tier of accounts whose edges are restricted to users
/// already in the graph. Densifies the graph without growing the user set.
pub fn augment(
    mut graph: BipartiteGraph,
    source: &dyn FollowerSource,
    min_followers: usize,
) -> Result<BipartiteGraph, PipelineError> {
    let accounts = source.list()?;
    let total = accounts.len();
    for (i, name) in accounts.iter().enumerate() {
        let followers = source.followers(name)?;
        if followers.len() <= min_followers {
            debug!(
                "{}/{}: {} skipped ({} followers)",
                i + 1,
                total,
                name,
                followers.len()
            );
            continue;
        }
        info!("{}/{}: {}", i + 1, total, name);
        let account = graph.add_node(name, NodeKind::Account)?;
        for follower in &followers {
            if let Some(user) = graph.node_id(follower) {
                graph.add_edge(user, account)?;
            }
        }
        debug!("\t number of nodes: {}", graph.node_count());
        debug!("\t number of edges: {}", graph.edge_count());
    }
    Ok(graph)
}

/// Runs the four construction passes in order and returns the final graph,
/// ready for matrix extraction.
pub fn run_build<R: Rng>(
    settings: &Settings,
    media: &dyn FollowerSource,
    augmentation: &dyn FollowerSource,
    rng: &mut R,
) -> Result<BipartiteGraph, PipelineError> {
    let catalog = AccountCatalog::scan(
        media,
        settings.min_followers,
        settings.big_account_threshold,
    )?;

    info!("Building core graph from small accounts");
    let graph = build_core(&catalog, media, settings.engagement_threshold)?;

    info!("Extending with big accounts");
    let (graph, sampled) = extend_with_sampled(
        graph,
        &catalog,
        media,
        settings.sample_size,
        settings.allow_short_sample,
        rng,
    )?;

    info!("Cross-linking {} sampled users", sampled.len());
    let graph = cross_link(graph, &catalog, media, &sampled)?;

    info!("Augmenting with additional accounts");
    let graph = augment(graph, augmentation, settings.augment_min_followers)?;

    info!(
        "Final graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
