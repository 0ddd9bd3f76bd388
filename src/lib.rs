pub mod core;
pub mod storage;
pub mod analysis;
pub mod index;
pub mod search;
pub mod analytics;
pub mod parallel;

/*
┌────────────────────────────────────────────────────────────────────────────────────────────┐
│                            PLANSCOPE STRUCT ARCHITECTURE                                    │
└────────────────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────────── CORE LAYER ──────────────────────────────────────────┐
│                                                                                              │
│  ┌────────────────────────────────────────────────────────────────────────────────────┐    │
│  │                             struct SearchEngine                                     │    │
│  │  ┌──────────────────────────────────────────────────────────────────────────────┐ │    │
│  │  │ config: Config                     // Field names, cache size, workers       │ │    │
│  │  │ layout: Option<StorageLayout>      // data_dir + history path                │ │    │
│  │  │ catalog: RwLock<Arc<Catalog>>      // Swapped on build, read by snapshot     │ │    │
│  │  │ tracker: QueryTracker              // AVL counts + history log               │ │    │
│  │  │ corrections: CorrectionCache       // term -> nearest word                   │ │    │
│  │  │ indexer: ParallelIndexer           // rayon document preparation             │ │    │
│  │  └──────────────────────────────────────────────────────────────────────────────┘ │    │
│  └────────────────────────────────────────────────────────────────────────────────────┘    │
│                                                                                              │
│  ┌──────────────────────┐  ┌────────────────────────┐  ┌─────────────────────────────┐     │
│  │ struct Catalog       │  │ struct SourceDocument  │  │ struct EngineStats          │     │
│  │ • plain: TrieIndex   │  │ • id: DocId            │  │ • documents / rows          │     │
│  │ • structured:        │  │ • header: Vec<String>  │  │ • plain / structured terms  │     │
│  │   StructuredIndex    │  │ • rows: Vec<Vec<..>>   │  │ • dictionary_words          │     │
│  │ • dictionary         │  └────────────────────────┘  │ • distinct / total queries  │     │
│  │ • store              │  ┌────────────────────────┐  │ • correction_cache          │     │
│  │ • storage_sizes      │  │ struct SearchRequest   │  └─────────────────────────────┘     │
│  │ • word_counts        │  │ • query: String        │                                       │
│  └──────────────────────┘  │ • price: RangeFilter   │                                       │
│                            │ • capacity: RangeFilter│                                       │
│                            └────────────────────────┘                                       │
└──────────────────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────────── INDEX LAYER ─────────────────────────────────────────┐
│                                                                                              │
│  ┌────────────────────────┐  ┌──────────────────────────┐  ┌───────────────────────────┐   │
│  │ struct TrieIndex       │  │ struct StructuredIndex   │  │ struct Postings           │   │
│  │ • nodes: Vec<TrieNode> │  │ • trie: TrieIndex        │  │ • docs: BTreeMap<DocId,   │   │
│  │ • term_count           │  │ • range(field, min, max) │  │   RoaringBitmap>          │   │
│  │ • lookup() / prefix()  │  └──────────────────────────┘  │ • merge()                 │   │
│  └────────────────────────┘  ┌──────────────────────────┐  └───────────────────────────┘   │
│  ┌────────────────────────┐  │ struct FieldTerm         │                                   │
│  │ struct TrieNode        │  │ • field / value          │                                   │
│  │ • children: Vec<(char, │  │ • encode() "field:value" │                                   │
│  │   NodeId)>             │  │ • decode()               │                                   │
│  │ • postings: Option<..> │  └──────────────────────────┘                                   │
│  └────────────────────────┘                                                                 │
└──────────────────────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────── SEARCH / ANALYTICS LAYER ─────────────────────────────────────┐
│                                                                                              │
│  ┌────────────────────────┐  ┌──────────────────────────┐  ┌───────────────────────────┐   │
│  │ struct Dictionary      │  │ struct CorrectionCache   │  │ struct DocumentStore      │   │
│  │ • words: Vec<String>   │  │ • cache: LruCache        │  │ • documents: HashMap      │   │
│  │ • seen: HashSet        │  │ • hit_count: Atomic      │  │ • materialize() -> Record │   │
│  │ • closest()            │  │ • miss_count: Atomic     │  └───────────────────────────┘   │
│  └────────────────────────┘  └──────────────────────────┘                                   │
│  ┌────────────────────────┐  ┌──────────────────────────┐  ┌───────────────────────────┐   │
│  │ struct FrequencyTree   │  │ struct QueryTracker      │  │ struct HistoryLog         │   │
│  │ • root: Option<Box<..>>│  │ • state: Mutex<          │  │ • file: File (append)     │   │
│  │ • insert() rotates     │  │   TrackerState>          │  │ • sync_mode: SyncMode     │   │
│  │ • top_k()              │  │ • record() / replay()    │  │ • read_entries()          │   │
│  └────────────────────────┘  └──────────────────────────┘  └───────────────────────────┘   │
└──────────────────────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────────── RELATIONSHIPS ────────────────────────────────────────────┐
│                                                                                              │
│  SearchEngine ──build──> ParallelIndexer ──prepares──> PreparedDocument                     │
│     │                                                      │                                 │
│     │                                  CatalogBuilder <──adds──┘                             │
│     │                                        │                                               │
│     ├──snapshot──> Catalog ──owns──> TrieIndex / StructuredIndex ──hold──> Postings          │
│     │                 │                                                                      │
│     │                 ├──owns──> Dictionary <──closest── CorrectionCache                     │
│     │                 └──owns──> DocumentStore ──materialize──> Record                       │
│     │                                                                                        │
│     └──owns──> QueryTracker ──guards──> FrequencyTree + HistoryLog                           │
│                                                                                              │
└──────────────────────────────────────────────────────────────────────────────────────────────┘
*/
