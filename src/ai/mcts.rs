//! Monte Carlo Tree Search with a single expansion per decision.
//!
//! Nodes live in a contiguous arena and refer to each other by [`NodeId`].
//! Only the first selected leaf of a decision is ever expanded, so the tree
//! never grows past the root's children. Rollouts are truncated after a few
//! random moves and then scored as a draw.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{AgentError, MoveError};
use crate::game::{winner, GameConfig, Grid, Mark, Observation};

use super::agent::{make_rng, Agent};
use super::selector::select_random;

/// Reward credited when the root player wins a rollout.
pub const WIN_REWARD: f64 = 1.0;
/// Reward credited when the opponent wins a rollout.
pub const LOSS_REWARD: f64 = -10.0;
/// Reward credited for a drawn or truncated rollout.
pub const DRAW_REWARD: f64 = 0.0;

/// MCTS hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Exploration constant `C` in the UCB1 formula.
    pub exploration: f64,
    /// Seconds subtracted from the move timeout.
    pub time_margin: f64,
    /// Random moves played per rollout before it is scored as a draw.
    pub rollout_cap: usize,
    /// Fixed number of iterations instead of a wall-clock budget.
    pub iterations: Option<usize>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            exploration: 1.0,
            time_margin: 0.3,
            rollout_cap: 3,
            iterations: None,
        }
    }
}

/// How long one decision may keep iterating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchBudget {
    Time(Duration),
    Iterations(usize),
}

impl SearchBudget {
    pub fn new(config: &MctsConfig, game: &GameConfig) -> Self {
        match config.iterations {
            Some(n) => SearchBudget::Iterations(n),
            None => {
                let seconds = (game.timeout - config.time_margin).max(0.0);
                SearchBudget::Time(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO))
            }
        }
    }

    fn exhausted(&self, elapsed: Duration, iterations: usize) -> bool {
        match *self {
            SearchBudget::Time(limit) => elapsed >= limit,
            SearchBudget::Iterations(n) => iterations >= n,
        }
    }
}

// ─── Tree ─────────────────────────────────────────────────────────────────────

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node (None for root)
    pub parent: Option<NodeId>,

    /// Column played from the parent to reach this node
    pub action: Option<usize>,

    pub grid: Grid,

    /// Mark whose move produced this node; the deciding agent for the root
    pub player: Mark,

    pub children: Vec<NodeId>,

    pub visit_count: u32,

    /// Sum of rewards credited to this node
    pub total_reward: f64,
}

impl MctsNode {
    fn new_root(grid: Grid, player: Mark) -> Self {
        MctsNode {
            parent: None,
            action: None,
            grid,
            player,
            children: Vec::new(),
            visit_count: 0,
            total_reward: 0.0,
        }
    }

    fn new_child(parent: NodeId, action: usize, grid: Grid, player: Mark) -> Self {
        MctsNode {
            parent: Some(parent),
            action: Some(action),
            grid,
            player,
            children: Vec::new(),
            visit_count: 0,
            total_reward: 0.0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// MCTS tree with arena-based node storage, owned by a single decision.
#[derive(Debug)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,
    root: NodeId,
    /// Iterations run so far; the `N` in the UCB1 exploration term.
    total_selections: u64,
    expanded: bool,
}

impl MctsTree {
    pub fn new(grid: Grid, player: Mark) -> Self {
        MctsTree {
            nodes: vec![MctsNode::new_root(grid, player)],
            root: NodeId(0),
            total_selections: 0,
            expanded: false,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn total_selections(&self) -> u64 {
        self.total_selections
    }

    /// Whether this decision's single expansion has happened.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Add a child reached by `player` dropping into `action`.
    pub fn add_child(&mut self, parent: NodeId, action: usize, grid: Grid, player: Mark) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(MctsNode::new_child(parent, action, grid, player));
        self.get_mut(parent).children.push(id);
        id
    }

    /// UCB1 score of a node. Every node scores `+∞` before the first
    /// iteration has been counted.
    pub fn ucb_score(&self, id: NodeId, exploration: f64) -> f64 {
        if self.total_selections == 0 {
            return f64::INFINITY;
        }
        let node = self.get(id);
        let visits = node.visit_count as f64 + 1.0;
        let exploitation = node.total_reward / visits;
        let explore = (2.0 * (self.total_selections as f64).ln() / visits).sqrt();
        exploitation + exploration * explore
    }

    /// Descend from the root along the highest UCB1 child until reaching a
    /// node without children. Ties are broken uniformly at random.
    pub fn select<R: Rng + ?Sized>(&self, exploration: f64, rng: &mut R) -> NodeId {
        let mut current = self.root;
        loop {
            let node = self.get(current);
            if node.is_leaf() {
                return current;
            }

            let mut best: Vec<NodeId> = Vec::new();
            let mut best_score = f64::NEG_INFINITY;
            for &child in &node.children {
                let score = self.ucb_score(child, exploration);
                if score > best_score {
                    best_score = score;
                    best.clear();
                    best.push(child);
                } else if score == best_score {
                    best.push(child);
                }
            }

            current = match best.len() {
                0 => node.children[0],
                n => best[rng.random_range(0..n)],
            };
        }
    }

    /// Expand `leaf` with one child per legal column and return the node to
    /// simulate from: an immediately winning child if there is one, otherwise
    /// a random child. Each child carries the leaf's own recorded player.
    ///
    /// Only the first call per tree expands anything; a leaf that is already
    /// decided is returned as is.
    pub fn expand<R: Rng + ?Sized>(
        &mut self,
        leaf: NodeId,
        inarow: usize,
        rng: &mut R,
    ) -> Result<NodeId, MoveError> {
        if self.expanded {
            return Ok(leaf);
        }
        self.expanded = true;

        let grid = self.get(leaf).grid.clone();
        let mover = self.get(leaf).player;
        let legal = grid.legal_columns();
        if legal.is_empty() || winner(&grid, inarow).is_some() {
            return Ok(leaf);
        }

        let mut winning = None;
        for col in legal {
            let child_grid = grid.drop_piece(col, mover)?;
            let wins = winner(&child_grid, inarow) == Some(mover);
            let child = self.add_child(leaf, col, child_grid, mover);
            if wins {
                winning = Some(child);
            }
        }

        match winning {
            Some(child) => Ok(child),
            None => {
                let children = &self.get(leaf).children;
                Ok(children[rng.random_range(0..children.len())])
            }
        }
    }

    /// Count one iteration towards the UCB1 exploration term.
    pub fn record_selection(&mut self) {
        self.total_selections += 1;
    }

    /// Credit the rollout result to `node` only.
    ///
    /// Ancestors are left untouched, so root children's statistics come only
    /// from rollouts started at those children.
    pub fn backpropagate(&mut self, node: NodeId, winner: Option<Mark>) {
        let root_player = self.get(self.root).player;
        let reward = match winner {
            Some(mark) if mark == root_player => WIN_REWARD,
            Some(_) => LOSS_REWARD,
            None => DRAW_REWARD,
        };

        let node = self.get_mut(node);
        node.visit_count += 1;
        node.total_reward += reward;
    }

    /// Column of the most visited root child; the first one wins ties.
    pub fn best_action(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for &child in &self.get(self.root).children {
            let node = self.get(child);
            let action = node.action?;
            if best.map_or(true, |(_, visits)| node.visit_count > visits) {
                best = Some((action, node.visit_count));
            }
        }
        best.map(|(action, _)| action)
    }

    /// `(column, visits, total_reward)` for every root child.
    pub fn root_statistics(&self) -> Vec<(usize, u32, f64)> {
        self.get(self.root)
            .children
            .iter()
            .filter_map(|&id| {
                let node = self.get(id);
                node.action.map(|a| (a, node.visit_count, node.total_reward))
            })
            .collect()
    }
}

/// Play at most `cap` uniformly random moves from `grid`, starting with the
/// side opposite `last_player`.
///
/// Returns the occupant of the first fully occupied window, or `None` when the
/// cap is reached or no column is left.
pub fn rollout<R: Rng + ?Sized>(
    grid: &Grid,
    last_player: Mark,
    inarow: usize,
    cap: usize,
    rng: &mut R,
) -> Result<Option<Mark>, MoveError> {
    if let Some(mark) = winner(grid, inarow) {
        return Ok(Some(mark));
    }

    let mut grid = grid.clone();
    let mut previous = last_player;
    for _ in 0..cap {
        let legal = grid.legal_columns();
        if legal.is_empty() {
            break;
        }
        let mover = previous.other();
        let col = legal[rng.random_range(0..legal.len())];
        grid = grid.drop_piece(col, mover)?;
        if let Some(mark) = winner(&grid, inarow) {
            return Ok(Some(mark));
        }
        previous = mover;
    }

    Ok(None)
}

// ─── Agent ────────────────────────────────────────────────────────────────────

/// Time-bounded MCTS agent.
pub struct MctsAgent {
    config: MctsConfig,
    rng: StdRng,
}

impl MctsAgent {
    pub fn new(config: MctsConfig, seed: Option<u64>) -> Self {
        MctsAgent {
            config,
            rng: make_rng(seed),
        }
    }

    /// One selection, (first-time) expansion, simulation and backpropagation.
    fn iterate(&mut self, tree: &mut MctsTree, inarow: usize) -> Result<(), MoveError> {
        let mut node = tree.select(self.config.exploration, &mut self.rng);
        if !tree.is_expanded() {
            node = tree.expand(node, inarow, &mut self.rng)?;
        }

        tree.record_selection();
        let start = tree.get(node);
        let winner = rollout(
            &start.grid,
            start.player,
            inarow,
            self.config.rollout_cap,
            &mut self.rng,
        )?;
        tree.backpropagate(node, winner);
        Ok(())
    }

    /// Grow a tree for `mark` on `grid` until the budget runs out. At least
    /// one iteration always runs.
    pub fn search(
        &mut self,
        grid: &Grid,
        mark: Mark,
        config: &GameConfig,
    ) -> Result<MctsTree, AgentError> {
        let budget = SearchBudget::new(&self.config, config);
        let mut tree = MctsTree::new(grid.clone(), mark);
        let start = Instant::now();
        let mut iterations = 0;

        loop {
            self.iterate(&mut tree, config.inarow)?;
            iterations += 1;
            if budget.exhausted(start.elapsed(), iterations) {
                break;
            }
        }

        debug!(
            iterations,
            nodes = tree.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            children = ?tree.root_statistics(),
            "mcts search finished"
        );
        Ok(tree)
    }
}

impl Agent for MctsAgent {
    fn select_action(
        &mut self,
        observation: &Observation,
        config: &GameConfig,
    ) -> Result<usize, AgentError> {
        let grid = observation.grid(config)?;
        let mark = observation.mark()?;

        let legal = grid.legal_columns();
        if legal.is_empty() {
            return Err(AgentError::NoLegalMoves);
        }

        let tree = self.search(&grid, mark, config)?;
        match tree.best_action() {
            Some(col) => Ok(col),
            None => {
                warn!("mcts root was never expanded, choosing a random column");
                select_random(&legal, &mut self.rng)
            }
        }
    }

    fn name(&self) -> &str {
        "MCTS"
    }
}
