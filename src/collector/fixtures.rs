//! Sample stats dump used by tests and documentation.

/// A complete dump as printed by a MongoRocks node: DB stats, the default
/// column family's compaction table and its trailing summary lines.
pub const SAMPLE_DUMP: &str = "\n\
** DB Stats **
Uptime(secs): 3600.0 total, 60.0 interval
Cumulative writes: 12K writes, 15K keys, 10K commit groups, 1.2 writes per commit group, ingest: 1.50 GB, 0.43 MB/s
Cumulative WAL: 12K writes, 300 syncs, 40.00 writes per sync, written: 1.25 GB, 0.36 MB/s
Cumulative stall: 00:01:30.500 H:M:S, 2.5 percent
Interval writes: 200 writes, 250 keys, 180 commit groups, 1.1 writes per commit group, ingest: 0.02 GB, 0.34 MB/s
Interval WAL: 200 writes, 5 syncs, 40.00 writes per sync, written: 0.02 GB, 0.34 MB/s
Interval stall: 00:00:0.000 H:M:S, 0.0 percent

** Compaction Stats [default] **
Level    Files   Size     Score Read(GB)  Rn(GB) Rnp1(GB) Write(GB) Wnew(GB) Moved(GB) W-Amp Rd(MB/s) Wr(MB/s) Comp(sec) Comp(cnt) Avg(sec) KeyIn KeyDrop
----------------------------------------------------------------------------------------------------------------------------------------------------------
  L0      2/0   12.50 MB   0.5      0.0     0.0      0.0       0.5      0.5       0.0   1.0      0.0     20.0        25        10    2.500       0      0
  L1      4/1   64.00 MB   0.9      1.0     0.5      0.5       1.0      0.5       0.1   2.0     30.0     31.0        33         4    8.250     12K     1K
  L2     10/0  256.00 MB   0.8      2.0     1.0      1.0       2.0      1.0       0.2   2.0     25.0     25.0        82         6   13.667     30K     2K
 Sum     16/1  332.50 MB   0.0      3.0     1.5      1.5       3.5      2.0       0.3   2.3     26.0     30.0       140        20    7.000     42K     3K
 Int      0/0    0.00 KB   0.0      0.0     0.0      0.0       0.0      0.0       0.0   0.0      0.0      0.0         0         0    0.000       0      0
Uptime(secs): 3600.0 total, 60.0 interval
Flush(GB): cumulative 0.500, interval 0.010
Cumulative compaction: 3.50 GB write, 1.00 MB/s write, 3.00 GB read, 0.85 MB/s read, 140.0 seconds
Stalls(count): 0 level0_slowdown, 0 level0_slowdown_with_compaction, 2 level0_numfiles, 1 memtable_compaction, 3 total

** File Read Latency Histogram By Level [default] **
";
