use crate::contact::ContactEvent;
use crate::pipeline::{BodyHandle, BodySet, SuperBody};
use alloc::collections::{BTreeSet, VecDeque};
use hashbrown::{HashMap, HashSet};

/// Partitions contacts into groups connected through the bodies they involve.
///
/// The enabled bodies appearing in the contacts are the nodes of a graph. Two nodes are
/// connected if they are in contact with each other, or if they are links of the same
/// articulated body. Each connected component yields one group, given as indices into
/// `contacts`, containing every contact that touches one of its bodies.
///
/// Contacts between two disabled bodies belong to no group.
pub fn determine_connected_contacts(
    contacts: &[ContactEvent],
    bodies: &impl BodySet,
) -> Vec<Vec<usize>> {
    let mut nodes = BTreeSet::new();
    let mut edges: HashMap<BodyHandle, Vec<BodyHandle>> = HashMap::new();

    for contact in contacts {
        let enabled1 = bodies.is_enabled(contact.body1);
        let enabled2 = bodies.is_enabled(contact.body2);

        if enabled1 {
            let _ = nodes.insert(contact.body1);
        }
        if enabled2 {
            let _ = nodes.insert(contact.body2);
        }
        if enabled1 && enabled2 {
            edges.entry(contact.body1).or_default().push(contact.body2);
            edges.entry(contact.body2).or_default().push(contact.body1);
        }
    }

    // Connect all the links of an articulation appearing in the graph.
    let mut processed = HashSet::new();
    for node in &nodes {
        let SuperBody::Articulated(articulation) = bodies.super_body(*node) else {
            continue;
        };

        if !processed.insert(articulation) {
            continue;
        }

        let links: Vec<_> = bodies
            .articulation_links(articulation)
            .into_iter()
            .filter(|link| nodes.contains(link))
            .collect();

        for (i, link1) in links.iter().enumerate() {
            for link2 in &links[i + 1..] {
                edges.entry(*link1).or_default().push(*link2);
                edges.entry(*link2).or_default().push(*link1);
            }
        }
    }

    let mut grouped = vec![false; contacts.len()];
    let mut groups = vec![];
    let mut queue = VecDeque::new();

    while let Some(seed) = nodes.pop_first() {
        let mut group = vec![];
        queue.push_back(seed);

        while let Some(node) = queue.pop_front() {
            let _ = nodes.remove(&node);

            for neighbor in edges.get(&node).into_iter().flatten() {
                if nodes.remove(neighbor) {
                    queue.push_back(*neighbor);
                }
            }

            for (i, contact) in contacts.iter().enumerate() {
                if !grouped[i] && (contact.body1 == node || contact.body2 == node) {
                    grouped[i] = true;
                    group.push(i);
                }
            }
        }

        log::debug!("contact group with {} contacts", group.len());
        groups.push(group);
    }

    groups
}

/// Removes the groups that do not contain any impacting contact.
pub fn remove_inactive_groups(
    groups: &mut Vec<Vec<usize>>,
    contacts: &[ContactEvent],
    bodies: &impl BodySet,
) {
    groups.retain(|group| group.iter().any(|i| contacts[*i].is_impacting(bodies)));
}
